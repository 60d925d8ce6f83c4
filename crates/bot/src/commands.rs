//! Command parsing and the name to handler table.

use std::collections::HashMap;

use dichbot_common::{AppError, AppResult};
use dichbot_core::UserId;
use futures::future::BoxFuture;

use crate::bot::Bot;

/// Arguments passed to every command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub chat_id: i64,
    pub user_id: UserId,
    /// Whitespace-separated words after the command name.
    pub args: Vec<String>,
}

impl CommandContext {
    /// Arguments re-joined with single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        self.args.join(" ")
    }

    /// The joined arguments, or [`AppError::MissingInput`] carrying `usage`.
    pub fn require_text(&self, usage: &str) -> AppResult<String> {
        if self.args.is_empty() {
            return Err(AppError::MissingInput(usage.to_string()));
        }
        Ok(self.text())
    }
}

/// A command found at the start of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased command name without the leading slash or `@bot` suffix.
    pub name: String,
    pub args: Vec<String>,
}

/// Split a bot command into its name, optional `@bot` suffix and the rest.
///
/// Only `/[A-Za-z0-9_]+` at the very start counts, the same shape Telegram
/// marks as a `bot_command` entity.
fn command_head(text: &str) -> Option<(&str, Option<&str>, &str)> {
    let rest = text.strip_prefix('/')?;
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (head, tail) = rest.split_at(end);

    let (name, addressee) = match head.split_once('@') {
        Some((name, addressee)) => (name, Some(addressee)),
        None => (head, None),
    };
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((name, addressee, tail))
}

/// Whether `text` starts with a bot command.
///
/// Text such as `/你好` or `/ 你好` is not a command and is handled like any
/// other message.
#[must_use]
pub fn is_command(text: &str) -> bool {
    command_head(text).is_some()
}

/// Parse `text` as a bot command.
///
/// Returns `None` when `text` is not a command, or when it is addressed to a
/// different bot via `/cmd@otherbot`. `bot_username` is compared
/// case-insensitively; when it is unknown any suffix is accepted.
#[must_use]
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<ParsedCommand> {
    let (name, addressee, tail) = command_head(text)?;
    if addressee
        .zip(bot_username)
        .is_some_and(|(addressee, username)| !addressee.eq_ignore_ascii_case(username))
    {
        return None;
    }

    Some(ParsedCommand {
        name: name.to_lowercase(),
        args: tail.split_whitespace().map(str::to_string).collect(),
    })
}

/// Future returned by a command handler.
pub type HandlerFuture<'a> = BoxFuture<'a, AppResult<()>>;

/// A command handler.
pub type CommandHandler = for<'a> fn(&'a Bot, &'a CommandContext) -> HandlerFuture<'a>;

/// Command table, filled once at startup.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, CommandHandler>,
}

impl CommandRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bot's command set.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("start", handlers::start);
        registry.register("help", handlers::help);
        registry.register("stats", handlers::stats);
        registry.register("auto_on", handlers::auto_on);
        registry.register("auto_off", handlers::auto_off);
        registry.register("dich", handlers::dich);
        registry.register("dich_zh", handlers::dich_zh);
        registry.register("dich_vi", handlers::dich_vi);
        registry
    }

    /// Register `handler` under `name`, replacing any previous handler.
    pub fn register(&mut self, name: &str, handler: CommandHandler) {
        self.handlers.insert(name.to_lowercase(), handler);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<CommandHandler> {
        self.handlers.get(name).copied()
    }
}

/// Adapters from registry entries to [`Bot`] methods.
mod handlers {
    use dichbot_core::Trigger;

    use super::{CommandContext, HandlerFuture};
    use crate::bot::Bot;
    use crate::messages;

    pub fn start<'a>(bot: &'a Bot, ctx: &'a CommandContext) -> HandlerFuture<'a> {
        Box::pin(bot.start(ctx))
    }

    pub fn help<'a>(bot: &'a Bot, ctx: &'a CommandContext) -> HandlerFuture<'a> {
        Box::pin(bot.help(ctx.chat_id))
    }

    pub fn stats<'a>(bot: &'a Bot, ctx: &'a CommandContext) -> HandlerFuture<'a> {
        Box::pin(bot.stats(ctx))
    }

    pub fn auto_on<'a>(bot: &'a Bot, ctx: &'a CommandContext) -> HandlerFuture<'a> {
        Box::pin(bot.set_auto(ctx, true))
    }

    pub fn auto_off<'a>(bot: &'a Bot, ctx: &'a CommandContext) -> HandlerFuture<'a> {
        Box::pin(bot.set_auto(ctx, false))
    }

    pub fn dich<'a>(bot: &'a Bot, ctx: &'a CommandContext) -> HandlerFuture<'a> {
        Box::pin(bot.translate_command(ctx, Trigger::AutoDetect, messages::USAGE_DICH))
    }

    pub fn dich_zh<'a>(bot: &'a Bot, ctx: &'a CommandContext) -> HandlerFuture<'a> {
        Box::pin(bot.translate_command(ctx, Trigger::ForceChinese, messages::USAGE_DICH_ZH))
    }

    pub fn dich_vi<'a>(bot: &'a Bot, ctx: &'a CommandContext) -> HandlerFuture<'a> {
        Box::pin(bot.translate_command(ctx, Trigger::ForceVietnamese, messages::USAGE_DICH_VI))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_command() {
        let parsed = parse_command("/dich   你好 \n 世界", None).unwrap();
        assert_eq!(parsed.name, "dich");
        assert_eq!(parsed.args, vec!["你好", "世界"]);
    }

    #[test]
    fn test_parse_command_without_args() {
        let parsed = parse_command("/start", None).unwrap();
        assert_eq!(parsed.name, "start");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn test_parse_addressed_command() {
        let parsed = parse_command("/dich_zh@DichBot Xin chào", Some("dichbot")).unwrap();
        assert_eq!(parsed.name, "dich_zh");
        assert_eq!(parsed.args, vec!["Xin", "chào"]);

        assert!(parse_command("/dich_zh@OtherBot Xin chào", Some("dichbot")).is_none());
        assert!(parse_command("/dich@AnyBot hi", None).is_some());
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert!(parse_command("hello", None).is_none());
        assert!(parse_command("/", None).is_none());
        assert!(parse_command("/ dich", None).is_none());
        assert!(parse_command("/@bot", None).is_none());
        assert!(parse_command("/你好", None).is_none());
        assert!(parse_command("/dich你好", None).is_none());
    }

    #[test]
    fn test_is_command_matches_bot_command_shape() {
        assert!(is_command("/dich_zh"));
        assert!(is_command("/Start123 args"));
        assert!(is_command("/dich@otherbot 你好"));

        assert!(!is_command("你好"));
        assert!(!is_command("/你好"));
        assert!(!is_command("/ 你好"));
        assert!(!is_command("/xin-chào"));
        assert!(!is_command("/"));
    }

    #[test]
    fn test_parse_lowercases_name() {
        assert_eq!(parse_command("/DICH hi", None).unwrap().name, "dich");
    }

    #[test]
    fn test_context_text_and_missing_input() {
        let ctx = CommandContext {
            chat_id: 1,
            user_id: 1,
            args: vec!["Xin".to_string(), "chào".to_string()],
        };
        assert_eq!(ctx.require_text("usage").unwrap(), "Xin chào");

        let empty = CommandContext {
            args: Vec::new(),
            ..ctx
        };
        let err = empty.require_text("usage").unwrap_err();
        assert!(matches!(err, AppError::MissingInput(ref hint) if hint == "usage"));
    }

    #[test]
    fn test_standard_registry() {
        let registry = CommandRegistry::standard();
        for name in [
            "start", "help", "stats", "auto_on", "auto_off", "dich", "dich_zh", "dich_vi",
        ] {
            assert!(registry.get(name).is_some(), "{name} is not registered");
        }
        assert!(registry.get("unknown").is_none());
    }
}
