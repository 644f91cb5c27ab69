//! Глобальный logger симуляции
//!
//! Хост (browser glue, headless runner, тесты) ставит свой `LogPrinter`,
//! код симуляции зовёт только `log*` helpers. Без printer'а любой вызов =
//! no-op, библиотеку никто не заспамит.
//!
//! Минимальный уровень: `set_log_level`, либо env `ARENA_LOG`
//! (`debug` / `info` / `warning` / `error`) при `init_logger()`.

use once_cell::sync::Lazy;
use std::sync::Mutex;

/// Env переменная с минимальным уровнем для `init_logger`
pub const LOG_LEVEL_ENV: &str = "ARENA_LOG";

// static → Arc не нужен
static PRINTER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static MIN_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Регистр не важен, `warn` = `warning`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn set_logger(printer: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = PRINTER.lock() {
        *slot = Some(printer);
    }
}

/// Ставит printer только если его ещё нет (тесты зовут многократно)
pub fn set_logger_if_needed(printer: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = PRINTER.lock() {
        if slot.is_none() {
            *slot = Some(printer);
        }
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current) = MIN_LEVEL.lock() {
        *current = level;
    }
}

pub fn log_level() -> LogLevel {
    MIN_LEVEL
        .lock()
        .map(|level| *level)
        .unwrap_or(LogLevel::Debug)
}

/// Пройдёт ли сообщение уровня `level` через фильтр
pub fn enabled(level: LogLevel) -> bool {
    level >= log_level()
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if !enabled(level) {
        return;
    }

    // timestamp добавляем здесь, printer форматирует только уровень
    if let Ok(slot) = PRINTER.lock() {
        if let Some(printer) = slot.as_ref() {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            printer.log(level, &format!("[{}] {}", timestamp, message));
        }
    }
}

pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Warning | LogLevel::Error => eprintln!("[{}] {}", level.as_str(), message),
            _ => println!("[{}] {}", level.as_str(), message),
        }
    }
}

/// ConsoleLogger + уровень из `ARENA_LOG` (если задан и валиден)
pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));

    if let Some(level) = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .as_deref()
        .and_then(LogLevel::parse)
    {
        set_log_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
    }

    #[test]
    fn test_parse_level_names() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse(" WARN "), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("Error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_default_level_lets_everything_through() {
        // глобальный уровень в тестах никто не поднимает
        assert_eq!(log_level(), LogLevel::Debug);
        assert!(enabled(LogLevel::Debug));
        assert!(enabled(LogLevel::Error));
    }
}
