use common::models::{Direction, SignalResult};
use strategy::services::signal_engine::{FAST_MA_PERIOD, SLOW_MA_PERIOD};

pub const GREETING: &str =
    "Привет! Нажми, чтобы получить сигнал (рандомная пара) или выбрать пару для запоминания.";
pub const CHOOSE_PAIR: &str = "Выбери пару для запоминания:";
pub const NO_LOGS: &str = "Логов пока нет.";

pub fn format_signal(signal: &SignalResult) -> String {
    let emoji = match signal.direction {
        Direction::Up => "🔼",
        Direction::Down => "🔽",
        Direction::Neutral => "⚪️",
    };
    let horizon = signal
        .horizon_minutes
        .map(|h| format!("{}–{} мин", h.min_minutes, h.max_minutes))
        .unwrap_or_else(|| "—".to_string());

    [
        format!("💹 {}", signal.symbol),
        format!("{} Сигнал: {}", emoji, signal.direction),
        format!(
            "📊 RSI: {:.2} | MA{}: {:.5} | MA{}: {:.5}",
            signal.rsi, FAST_MA_PERIOD, signal.ma_fast, SLOW_MA_PERIOD, signal.ma_slow
        ),
        format!("💰 Цена: {:.5}", signal.last_price),
        format!("⏱ Рекомендуемое время: {}", horizon),
        format!("🎯 Сила сигнала: {}", signal.strength),
    ]
    .join("\n")
}

pub fn collecting(pair: &impl std::fmt::Display) -> String {
    format!("Выбрана пара: {pair} — собираю данные...")
}

pub fn pair_saved(pair: &impl std::fmt::Display) -> String {
    format!("Пара {pair} сохранена. Теперь кнопка «сигнал по сохранённой паре» будет использовать её.")
}

pub fn fetch_failed(err: &impl std::fmt::Display) -> String {
    format!("Ошибка при получении данных: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::{Horizon, Strength};

    fn signal(direction: Direction, horizon_minutes: Option<Horizon>) -> SignalResult {
        SignalResult {
            symbol: "EUR/USD".to_string(),
            rsi: 27.456,
            ma_fast: 1.085123,
            ma_slow: 1.084987,
            direction,
            strength: Strength::Medium,
            horizon_minutes,
            last_price: 1.08541,
        }
    }

    #[test]
    fn formats_directional_signal() {
        let text = format_signal(&signal(
            Direction::Up,
            Some(Horizon {
                min_minutes: 2,
                max_minutes: 5,
            }),
        ));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "💹 EUR/USD",
                "🔼 Сигнал: UP",
                "📊 RSI: 27.46 | MA5: 1.08512 | MA14: 1.08499",
                "💰 Цена: 1.08541",
                "⏱ Рекомендуемое время: 2–5 мин",
                "🎯 Сила сигнала: medium",
            ]
        );
    }

    #[test]
    fn neutral_signal_has_no_horizon() {
        let text = format_signal(&signal(Direction::Neutral, None));
        assert!(text.contains("⚪️ Сигнал: NEUTRAL"));
        assert!(text.contains("Рекомендуемое время: —\n"));
    }
}
