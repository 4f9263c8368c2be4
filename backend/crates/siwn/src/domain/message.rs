//! Challenge message model
//!
//! The canonical human-readable text block a wallet signs. Layout is
//! fixed-order and newline-delimited:
//!
//! ```text
//! <domain> wants you to sign in with your Neo account:
//! <address>
//!
//! <statement>
//!
//! URI: <uri>
//! Version: <version>
//! Chain ID: <chain id>
//! Nonce: <nonce>
//! Issued At: <RFC 3339>
//! Expiration Time: <RFC 3339>        (optional)
//! ```

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{SiwnError, SiwnResult};

const TITLE_SUFFIX: &str = " wants you to sign in with your Neo account:";

/// One signing challenge instance. Built by the frontend, reconstructed
/// here by parsing, consumed once during verification, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeMessage {
    pub domain: String,
    pub address: String,
    pub statement: String,
    pub uri: String,
    pub version: String,
    pub chain_id: i64,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    pub expiration_time: Option<DateTime<Utc>>,
}

impl ChallengeMessage {
    /// Render the canonical text block.
    ///
    /// Timestamps are emitted with millisecond precision and a `Z`
    /// suffix, matching what the signing client produces.
    pub fn build(&self) -> String {
        let mut lines = vec![
            format!("{}{TITLE_SUFFIX}", self.domain),
            self.address.clone(),
            String::new(),
            self.statement.clone(),
            String::new(),
            format!("URI: {}", self.uri),
            format!("Version: {}", self.version),
            format!("Chain ID: {}", self.chain_id),
            format!("Nonce: {}", self.nonce),
            format!("Issued At: {}", format_timestamp(self.issued_at)),
        ];
        if let Some(expiration) = self.expiration_time {
            lines.push(format!("Expiration Time: {}", format_timestamp(expiration)));
        }
        lines.join("\n")
    }

    /// Reconstruct a message from its text form.
    ///
    /// Unrecognized `Key: value` lines are ignored; a missing required
    /// field, a non-numeric chain id, or an unparsable timestamp is a
    /// [`SiwnError::MalformedMessage`].
    pub fn parse(text: &str) -> SiwnResult<Self> {
        let lines: Vec<&str> = text.split('\n').collect();

        let domain = lines
            .first()
            .and_then(|line| line.strip_suffix(TITLE_SUFFIX))
            .filter(|domain| !domain.is_empty())
            .ok_or_else(|| malformed("missing or invalid title line"))?
            .to_string();

        let address = lines
            .get(1)
            .filter(|line| !line.is_empty())
            .ok_or_else(|| malformed("missing address line"))?
            .to_string();

        let statement = lines
            .get(3)
            .ok_or_else(|| malformed("missing statement line"))?
            .to_string();

        let mut uri = None;
        let mut version = None;
        let mut chain_id = None;
        let mut nonce = None;
        let mut issued_at = None;
        let mut expiration_time = None;

        for line in lines.iter().skip(4) {
            let Some((key, value)) = line.split_once(": ") else {
                continue;
            };
            match key {
                "URI" => uri = Some(value.to_string()),
                "Version" => version = Some(value.to_string()),
                "Chain ID" => {
                    chain_id = Some(
                        value
                            .parse::<i64>()
                            .map_err(|_| malformed("Chain ID is not numeric"))?,
                    )
                }
                "Nonce" => nonce = Some(value.to_string()),
                "Issued At" => issued_at = Some(parse_timestamp("Issued At", value)?),
                "Expiration Time" => {
                    expiration_time = Some(parse_timestamp("Expiration Time", value)?)
                }
                _ => {}
            }
        }

        Ok(Self {
            domain,
            address,
            statement,
            uri: uri.ok_or_else(|| malformed("missing URI field"))?,
            version: version.ok_or_else(|| malformed("missing Version field"))?,
            chain_id: chain_id.ok_or_else(|| malformed("missing Chain ID field"))?,
            nonce: nonce.ok_or_else(|| malformed("missing Nonce field"))?,
            issued_at: issued_at.ok_or_else(|| malformed("missing Issued At field"))?,
            expiration_time,
        })
    }

    /// Validate temporal and identity claims against `now`.
    ///
    /// Checks run in a fixed order so a message failing several checks
    /// deterministically surfaces the first: expected domain, expected
    /// nonce, expiration, issued-at.
    pub fn validate(
        &self,
        now: DateTime<Utc>,
        expected_domain: Option<&str>,
        expected_nonce: Option<&str>,
    ) -> SiwnResult<()> {
        if let Some(expected) = expected_domain {
            if self.domain != expected {
                return Err(SiwnError::DomainMismatch);
            }
        }
        if let Some(expected) = expected_nonce {
            if self.nonce != expected {
                return Err(SiwnError::NonceMismatch);
            }
        }
        if let Some(expiration) = self.expiration_time {
            if expiration < now {
                return Err(SiwnError::MessageExpired);
            }
        }
        if self.issued_at > now {
            return Err(SiwnError::IssuedInFuture);
        }
        Ok(())
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(field: &str, value: &str) -> SiwnResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| malformed(&format!("{field} is not a valid RFC 3339 timestamp")))
}

fn malformed(detail: &str) -> SiwnError {
    SiwnError::MalformedMessage(detail.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample() -> ChallengeMessage {
        ChallengeMessage {
            domain: "app.example.com".to_string(),
            address: "NWxZhS89HjdRw2ZushLjEZTdd51ErUFx6a".to_string(),
            statement: "Sign in to the app.".to_string(),
            uri: "https://app.example.com".to_string(),
            version: "1".to_string(),
            chain_id: 3,
            nonce: "8cbd2e49a1b7427f9c5d8e03a6f41b22".to_string(),
            issued_at: Utc.with_ymd_and_hms(2024, 2, 14, 22, 27, 35).unwrap(),
            expiration_time: Some(Utc.with_ymd_and_hms(2024, 2, 14, 22, 32, 35).unwrap()),
        }
    }

    #[test]
    fn test_build_layout() {
        let text = sample().build();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(
            lines[0],
            "app.example.com wants you to sign in with your Neo account:"
        );
        assert_eq!(lines[1], "NWxZhS89HjdRw2ZushLjEZTdd51ErUFx6a");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Sign in to the app.");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "URI: https://app.example.com");
        assert_eq!(lines[9], "Issued At: 2024-02-14T22:27:35.000Z");
        assert_eq!(lines[10], "Expiration Time: 2024-02-14T22:32:35.000Z");
    }

    #[test]
    fn test_roundtrip_full() {
        let message = sample();
        let parsed = ChallengeMessage::parse(&message.build()).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_roundtrip_without_expiration() {
        let message = ChallengeMessage {
            expiration_time: None,
            ..sample()
        };
        let text = message.build();
        assert_eq!(text.split('\n').count(), 10);
        let parsed = ChallengeMessage::parse(&text).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let mut text = sample().build();
        text.push_str("\nRequest ID: 1234");
        let parsed = ChallengeMessage::parse(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_rejects_bad_title() {
        let err = ChallengeMessage::parse("hello world").unwrap_err();
        assert!(matches!(err, SiwnError::MalformedMessage(_)));

        // Title line alone is not enough either
        let err =
            ChallengeMessage::parse("x wants you to sign in with your Neo account:").unwrap_err();
        assert!(matches!(err, SiwnError::MalformedMessage(_)));
    }

    #[test]
    fn test_parse_rejects_non_numeric_chain_id() {
        let text = sample().build().replace("Chain ID: 3", "Chain ID: three");
        let err = ChallengeMessage::parse(&text).unwrap_err();
        assert!(matches!(err, SiwnError::MalformedMessage(_)));
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let text = sample()
            .build()
            .replace("Issued At: 2024-02-14T22:27:35.000Z", "Issued At: yesterday");
        let err = ChallengeMessage::parse(&text).unwrap_err();
        assert!(matches!(err, SiwnError::MalformedMessage(_)));
    }

    #[test]
    fn test_parse_rejects_missing_nonce() {
        let message = sample();
        let text = message
            .build()
            .replace(&format!("Nonce: {}\n", message.nonce), "");
        let err = ChallengeMessage::parse(&text).unwrap_err();
        assert!(matches!(err, SiwnError::MalformedMessage(_)));
    }

    #[test]
    fn test_validate_passes_inside_window() {
        let message = sample();
        let now = message.issued_at + Duration::minutes(2);
        assert!(message.validate(now, None, None).is_ok());
        assert!(
            message
                .validate(now, Some("app.example.com"), Some(&message.nonce))
                .is_ok()
        );
    }

    #[test]
    fn test_validate_expired() {
        let message = sample();
        let now = message.expiration_time.unwrap() + Duration::seconds(1);
        let err = message.validate(now, None, None).unwrap_err();
        assert!(matches!(err, SiwnError::MessageExpired));
    }

    #[test]
    fn test_validate_issued_in_future() {
        let message = sample();
        let now = message.issued_at - Duration::seconds(1);
        let err = message.validate(now, None, None).unwrap_err();
        assert!(matches!(err, SiwnError::IssuedInFuture));
    }

    #[test]
    fn test_validate_domain_mismatch() {
        let message = sample();
        let now = message.issued_at + Duration::minutes(2);
        let err = message.validate(now, Some("other.com"), None).unwrap_err();
        assert!(matches!(err, SiwnError::DomainMismatch));
    }

    #[test]
    fn test_validate_nonce_mismatch() {
        let message = sample();
        let now = message.issued_at + Duration::minutes(2);
        let err = message.validate(now, None, Some("different")).unwrap_err();
        assert!(matches!(err, SiwnError::NonceMismatch));
    }

    #[test]
    fn test_validate_check_order_is_deterministic() {
        // Expired message with a wrong expected domain: the domain check
        // runs first and wins
        let message = sample();
        let now = message.expiration_time.unwrap() + Duration::minutes(1);
        let err = message.validate(now, Some("other.com"), None).unwrap_err();
        assert!(matches!(err, SiwnError::DomainMismatch));

        // Wrong nonce beats expiry as well
        let err = message.validate(now, None, Some("different")).unwrap_err();
        assert!(matches!(err, SiwnError::NonceMismatch));
    }
}
