use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    DeepSeek,
    Coze,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Ok(ProviderKind::DeepSeek),
            "coze" => Ok(ProviderKind::Coze),
            other => Err(format!("unknown provider `{}` (expected deepseek or coze)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    Clear,
    Providers,
    Use(ProviderKind),
    Message(String),
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_lowercase();
        Ok(match lower.as_str() {
            "exit" => Command::Exit,
            "clear" => Command::Clear,
            "providers" => Command::Providers,
            _ => match lower.strip_prefix("use ") {
                Some(name) => Command::Use(name.parse()?),
                None => Command::Message(s.to_string()),
            },
        })
    }
}

pub const COMMAND_BOX: &str = "\
┌──────────────────────────────────────────┐\n\
│            Available Commands            │\n\
├──────────────────────────────────────────┤\n\
│  `exit`           - Quit the application │\n\
├──────────────────────────────────────────┤\n\
│  `clear`          - Clear the screen     │\n\
├──────────────────────────────────────────┤\n\
│  `providers`      - List providers       │\n\
├──────────────────────────────────────────┤\n\
│  `use <provider>` - deepseek or coze     │\n\
└──────────────────────────────────────────┘";
