use std::str::FromStr;

use common::models::CurrencyPair;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use thiserror::Error;

const PAIR_PREFIX: &str = "pair_";

/// What a pressed inline button asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAction {
    RandomSignal,
    SavedSignal,
    ChoosePair,
    PairSelected(CurrencyPair),
    GetLogs,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown callback data `{0}`")]
pub struct UnknownAction(pub String);

impl BotAction {
    pub fn callback_data(&self) -> String {
        match self {
            Self::RandomSignal => "get_random".to_string(),
            Self::SavedSignal => "get_saved".to_string(),
            Self::ChoosePair => "choose_pair".to_string(),
            Self::PairSelected(pair) => format!("{PAIR_PREFIX}{}", pair.tag()),
            Self::GetLogs => "get_logs".to_string(),
        }
    }
}

impl FromStr for BotAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get_random" => Ok(Self::RandomSignal),
            "get_saved" => Ok(Self::SavedSignal),
            "choose_pair" => Ok(Self::ChoosePair),
            "get_logs" => Ok(Self::GetLogs),
            _ => s
                .strip_prefix(PAIR_PREFIX)
                .and_then(|tag| tag.parse().ok())
                .map(Self::PairSelected)
                .ok_or_else(|| UnknownAction(s.to_string())),
        }
    }
}

fn button(text: impl Into<String>, action: &BotAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.callback_data())
}

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("📊 Получить рандомный сигнал", &BotAction::RandomSignal)],
        vec![button("📌 Сигнал по сохранённой паре", &BotAction::SavedSignal)],
        vec![button("🔁 Выбрать и запомнить пару", &BotAction::ChoosePair)],
        vec![button("📁 Получить логи", &BotAction::GetLogs)],
    ])
}

pub fn pair_menu(pairs: &[CurrencyPair]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        pairs
            .iter()
            .map(|pair| vec![button(pair.to_string(), &BotAction::PairSelected(pair.clone()))])
            .collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_payloads(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn parses_fixed_actions() {
        assert_eq!("get_random".parse(), Ok(BotAction::RandomSignal));
        assert_eq!("get_saved".parse(), Ok(BotAction::SavedSignal));
        assert_eq!("choose_pair".parse(), Ok(BotAction::ChoosePair));
        assert_eq!("get_logs".parse(), Ok(BotAction::GetLogs));
    }

    #[test]
    fn parses_pair_selection() {
        let action: BotAction = "pair_USD_JPY".parse().unwrap();
        assert_eq!(action, BotAction::PairSelected("USD/JPY".parse().unwrap()));
        assert_eq!(action.callback_data(), "pair_USD_JPY");
    }

    #[test]
    fn rejects_unknown_data() {
        assert_eq!(
            "pair_bogus".parse::<BotAction>(),
            Err(UnknownAction("pair_bogus".to_string()))
        );
        assert!("".parse::<BotAction>().is_err());
    }

    #[test]
    fn menus_round_trip_through_parser() {
        let pairs = CurrencyPair::supported();
        let mut payloads = callback_payloads(&main_menu());
        payloads.extend(callback_payloads(&pair_menu(&pairs)));

        assert_eq!(payloads.len(), 4 + pairs.len());
        for data in payloads {
            // Telegram caps callback data at 64 bytes
            assert!(data.len() <= 64);
            assert!(data.parse::<BotAction>().is_ok(), "{data}");
        }
    }
}
