//! Vote emote parsing.
//!
//! Config lists vote emotes either as a plain unicode emoji ("👍") or
//! as a custom guild emote in "name:id" form ("votent:1234567890").

use serenity::model::channel::ReactionType;
use serenity::model::id::EmojiId;

/// Parse a configured emote spec into a reaction.
///
/// Returns `None` for unknown unicode sequences, malformed custom
/// forms, and zero ids.
pub fn parse_emote(spec: &str) -> Option<ReactionType> {
    if let Some((name, id)) = spec.rsplit_once(':') {
        let id: u64 = id.parse().ok()?;
        if name.is_empty() || id == 0 {
            return None;
        }
        return Some(ReactionType::Custom {
            animated: false,
            id: EmojiId::new(id),
            name: Some(name.to_string()),
        });
    }

    emojis::get(spec).map(|emoji| ReactionType::Unicode(emoji.as_str().to_string()))
}

/// Parse all configured emotes, preserving their order.
///
/// Specs are validated at startup, so a failed parse here only drops
/// that one entry.
pub fn parse_emotes(specs: &[String]) -> Vec<ReactionType> {
    specs.iter().filter_map(|spec| parse_emote(spec)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unicode_emote() {
        let emote = parse_emote("👍").expect("thumbs up is a valid emoji");
        assert_eq!(emote, ReactionType::Unicode("👍".to_string()));
    }

    #[test]
    fn test_parse_custom_emote() {
        let emote = parse_emote("votent:123456789").expect("custom form should parse");
        match emote {
            ReactionType::Custom { id, name, .. } => {
                assert_eq!(id, EmojiId::new(123456789));
                assert_eq!(name.as_deref(), Some("votent"));
            }
            other => panic!("expected custom emote, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_emote("not an emoji").is_none());
        assert!(parse_emote("votent:not-a-number").is_none());
        assert!(parse_emote(":123").is_none());
    }

    #[test]
    fn test_parse_rejects_zero_id() {
        assert!(parse_emote("votent:0").is_none());
    }

    #[test]
    fn test_parse_emotes_preserves_order() {
        let specs = vec![
            "👍".to_string(),
            "👎".to_string(),
            "votent:42".to_string(),
        ];
        let emotes = parse_emotes(&specs);
        assert_eq!(emotes.len(), 3);
        assert_eq!(emotes[0], ReactionType::Unicode("👍".to_string()));
        assert_eq!(emotes[1], ReactionType::Unicode("👎".to_string()));
        assert!(matches!(emotes[2], ReactionType::Custom { .. }));
    }

    #[test]
    fn test_parse_emotes_drops_invalid() {
        let specs = vec!["👍".to_string(), "bogus".to_string()];
        assert_eq!(parse_emotes(&specs).len(), 1);
    }
}
