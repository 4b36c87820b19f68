use std::sync::Arc;

use market_data::AlphaVantageClient;
use storage::InMemoryPairStore;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use common::models::CurrencyPair;

use crate::services::actions::{BotAction, main_menu, pair_menu};
use crate::services::reply;
use crate::services::signal_service::SignalService;

pub type BotSignalService = SignalService<AlphaVantageClient, InMemoryPairStore>;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
enum Command {
    #[command(description = "показать меню")]
    Start,
    #[command(description = "показать меню")]
    Help,
}

pub struct TelegramService {
    bot: Bot,
    signals: Arc<BotSignalService>,
}

impl TelegramService {
    pub fn new(token: &str, signals: Arc<BotSignalService>) -> Self {
        Self {
            bot: Bot::new(token),
            signals,
        }
    }

    /// Long-polls Telegram until Ctrl-C.
    pub async fn start(self) {
        info!("Starting Telegram bot (long polling)");

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(handle_command),
            )
            .branch(Update::filter_callback_query().endpoint(handle_callback));

        Dispatcher::builder(self.bot, handler)
            .dependencies(dptree::deps![self.signals])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram bot stopped");
    }
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    match cmd {
        Command::Start | Command::Help => {
            bot.send_message(msg.chat.id, reply::GREETING)
                .reply_markup(main_menu())
                .await?;
        }
    }
    Ok(())
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    signals: Arc<BotSignalService>,
) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        warn!("Callback {} has no message attached", q.id);
        return Ok(());
    };
    let action = match q.data.as_deref().unwrap_or_default().parse::<BotAction>() {
        Ok(action) => action,
        Err(e) => {
            warn!("Chat {}: {}", chat_id, e);
            return Ok(());
        }
    };
    info!("Chat {} pressed {:?}", chat_id, action);

    match action {
        BotAction::RandomSignal => {
            let pair = signals.pick_random_pair(chat_id.0).await;
            bot.send_message(chat_id, reply::collecting(&pair)).await?;
            send_signal(&bot, chat_id, &signals, &pair).await?;
        }
        BotAction::SavedSignal => {
            let pair = signals.saved_pair(chat_id.0).await;
            bot.send_message(chat_id, reply::collecting(&pair)).await?;
            send_signal(&bot, chat_id, &signals, &pair).await?;
        }
        BotAction::ChoosePair => {
            bot.send_message(chat_id, reply::CHOOSE_PAIR)
                .reply_markup(pair_menu(signals.catalog()))
                .await?;
        }
        BotAction::PairSelected(pair) => {
            signals.remember_pair(chat_id.0, pair.clone()).await;
            bot.send_message(chat_id, reply::pair_saved(&pair)).await?;
        }
        BotAction::GetLogs => match signals.log_file().await {
            Ok(Some(path)) => {
                bot.send_document(chat_id, InputFile::file(path)).await?;
            }
            Ok(None) => {
                bot.send_message(chat_id, reply::NO_LOGS).await?;
            }
            Err(e) => {
                error!("Failed to read signal log: {}", e);
                bot.send_message(chat_id, reply::NO_LOGS).await?;
            }
        },
    }
    Ok(())
}

async fn send_signal(
    bot: &Bot,
    chat_id: ChatId,
    signals: &BotSignalService,
    pair: &CurrencyPair,
) -> ResponseResult<()> {
    let text = match signals.signal_for(chat_id.0, pair).await {
        Ok(signal) => reply::format_signal(&signal),
        Err(e) => {
            warn!("Signal for {} failed: {}", pair, e);
            reply::fetch_failed(&e)
        }
    };
    bot.send_message(chat_id, text).await?;
    Ok(())
}
