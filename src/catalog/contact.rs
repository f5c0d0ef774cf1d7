//! Contact links attached to listings

use serde::{Deserialize, Serialize};
use url::Url;

const WHATSAPP_HOST: &str = "wa.me";

/// How to reach the owner of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContactLink {
    /// Click-to-chat link with a prefilled message
    WhatsApp {
        phone: String,
        message: Option<String>,
    },
    Email {
        address: String,
        subject: Option<String>,
    },
    Other { url: String },
}

impl ContactLink {
    /// Parse a contact URL; anything unrecognised becomes `Other`
    pub fn parse(url: &str) -> Self {
        Url::parse(url)
            .ok()
            .and_then(|parsed| Self::from_url(&parsed))
            .unwrap_or_else(|| Self::Other {
                url: url.to_string(),
            })
    }

    fn from_url(url: &Url) -> Option<Self> {
        match url.scheme() {
            "https" | "http" if url.host_str() == Some(WHATSAPP_HOST) => {
                let phone = decoded_path(url);
                let phone = phone.trim_matches('/');
                if phone.is_empty() {
                    return None;
                }
                Some(Self::WhatsApp {
                    phone: phone.to_string(),
                    message: query_param(url, "text"),
                })
            }
            "mailto" => {
                let address = decoded_path(url);
                if !address.contains('@') {
                    return None;
                }
                Some(Self::Email {
                    address,
                    subject: query_param(url, "subject"),
                })
            }
            _ => None,
        }
    }

    /// Short label describing the channel
    pub fn label(&self) -> String {
        match self {
            Self::WhatsApp { phone, .. } => format!("WhatsApp +{}", phone),
            Self::Email { address, .. } => format!("Email {}", address),
            Self::Other { url } => url.clone(),
        }
    }
}

fn decoded_path(url: &Url) -> String {
    urlencoding::decode(url.path())
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| url.path().to_string())
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whatsapp() {
        let link = ContactLink::parse(
            "https://wa.me/60148190876?text=Hi%2C%20I%20want%20to%20rent%20your%20Camera",
        );
        assert_eq!(
            link,
            ContactLink::WhatsApp {
                phone: "60148190876".to_string(),
                message: Some("Hi, I want to rent your Camera".to_string()),
            }
        );
        assert_eq!(link.label(), "WhatsApp +60148190876");
    }

    #[test]
    fn test_parse_mailto() {
        let link = ContactLink::parse("mailto:jokerz1403@gmail.com?subject=Rent%20Generator");
        assert_eq!(
            link,
            ContactLink::Email {
                address: "jokerz1403@gmail.com".to_string(),
                subject: Some("Rent Generator".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_without_query() {
        let link = ContactLink::parse("mailto:owner@example.com");
        assert!(matches!(link, ContactLink::Email { subject: None, .. }));
    }

    #[test]
    fn test_parse_other() {
        let link = ContactLink::parse("https://example.com/rent");
        assert_eq!(link.label(), "https://example.com/rent");
        assert!(matches!(ContactLink::parse("mailto:nobody"), ContactLink::Other { .. }));
    }

    #[test]
    fn test_plus_decodes_to_space() {
        let link = ContactLink::parse("https://wa.me/60148190876?text=Hi+there");
        assert!(matches!(
            link,
            ContactLink::WhatsApp { message: Some(ref m), .. } if m == "Hi there"
        ));
    }

    #[test]
    fn test_fragment_is_not_part_of_subject() {
        let link = ContactLink::parse("mailto:owner@example.com?subject=Rent%20Tent#top");
        assert_eq!(
            link,
            ContactLink::Email {
                address: "owner@example.com".to_string(),
                subject: Some("Rent Tent".to_string()),
            }
        );
    }

    #[test]
    fn test_unparseable_is_other() {
        assert!(matches!(ContactLink::parse("not a url"), ContactLink::Other { .. }));
        assert!(matches!(ContactLink::parse("https://wa.me/"), ContactLink::Other { .. }));
    }
}
