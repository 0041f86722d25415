//! Commands typed into the watch view

use std::str::FromStr;

use crate::errors::ConsoleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Refresh,
    Deploy,
    Redeploy,
    Select(String),
    NextPage,
    PrevPage,
    Page(u32),
    /// Fetch the selected transcript now, regardless of status
    Logs,
    ScrollUp(usize),
    ScrollDown(usize),
    Follow,
    Delete(String),
    Help,
    Quit,
}

fn line_count(arg: Option<&str>) -> Result<usize, ConsoleError> {
    match arg {
        None => Ok(10),
        Some(n) => n
            .parse()
            .map_err(|_| ConsoleError::ValidationError(format!("Not a line count: {}", n))),
    }
}

impl FromStr for WatchCommand {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        let required = |what: &str| {
            arg.map(str::to_string)
                .ok_or_else(|| ConsoleError::ValidationError(format!("Usage: {} <id>", what)))
        };

        match name.as_str() {
            "r" | "refresh" => Ok(WatchCommand::Refresh),
            "deploy" => Ok(WatchCommand::Deploy),
            "redeploy" => Ok(WatchCommand::Redeploy),
            "s" | "select" => required("select").map(WatchCommand::Select),
            "n" | "next" => Ok(WatchCommand::NextPage),
            "p" | "prev" => Ok(WatchCommand::PrevPage),
            "page" => {
                let page = required("page")?;
                page.parse()
                    .map(WatchCommand::Page)
                    .map_err(|_| ConsoleError::ValidationError(format!("Not a page: {}", page)))
            }
            "l" | "logs" => Ok(WatchCommand::Logs),
            "u" | "up" => line_count(arg).map(WatchCommand::ScrollUp),
            "d" | "down" => line_count(arg).map(WatchCommand::ScrollDown),
            "f" | "follow" => Ok(WatchCommand::Follow),
            "delete" => required("delete").map(WatchCommand::Delete),
            "h" | "help" | "?" => Ok(WatchCommand::Help),
            "q" | "quit" | "exit" => Ok(WatchCommand::Quit),
            "" => Err(ConsoleError::ValidationError("Empty command".to_string())),
            other => Err(ConsoleError::ValidationError(format!(
                "Unknown command: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("  R ".parse::<WatchCommand>().unwrap(), WatchCommand::Refresh);
        assert_eq!(
            "select d42".parse::<WatchCommand>().unwrap(),
            WatchCommand::Select("d42".to_string())
        );
        assert_eq!("up".parse::<WatchCommand>().unwrap(), WatchCommand::ScrollUp(10));
        assert_eq!("down 3".parse::<WatchCommand>().unwrap(), WatchCommand::ScrollDown(3));
        assert_eq!("page 2".parse::<WatchCommand>().unwrap(), WatchCommand::Page(2));
    }

    #[test]
    fn test_parse_errors() {
        assert!("select".parse::<WatchCommand>().is_err());
        assert!("up many".parse::<WatchCommand>().is_err());
        assert!("dance".parse::<WatchCommand>().is_err());
        assert!("".parse::<WatchCommand>().is_err());
    }
}
