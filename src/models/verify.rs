use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Lowercases, maps `_`/`-` to spaces and collapses runs of whitespace, so
/// `"LIKELY_TRUE"` and `"Likely  true"` both read as `"likely true"`.
fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let normalized = normalize_label(raw);
                $(
                    if normalized == $label {
                        return Ok($name::$variant);
                    }
                )+
                Err(UnknownLabel {
                    kind: $kind,
                    value: raw.to_string(),
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

label_enum!(
    /// Overall credibility verdict for an article.
    ArticleVerdict, "verdict" {
        LikelyReliable => "likely reliable",
        Questionable => "questionable",
        VeryLikelyMisinformation => "very likely misinformation",
        Uncertain => "uncertain",
    }
);

label_enum!(
    /// Assessment of a single factual claim.
    ClaimAssessment, "assessment" {
        LikelyTrue => "likely true",
        LikelyFalse => "likely false",
        Misleading => "misleading",
        Uncertain => "uncertain",
    }
);

/// Clamps a model-reported confidence into `[0, 1]`. NaN reads as no confidence.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_leniently() {
        assert_eq!(
            "LIKELY_TRUE".parse::<ClaimAssessment>().unwrap(),
            ClaimAssessment::LikelyTrue
        );
        assert_eq!(
            " Very-Likely  Misinformation ".parse::<ArticleVerdict>().unwrap(),
            ArticleVerdict::VeryLikelyMisinformation
        );
        assert_eq!(
            "uncertain".parse::<ArticleVerdict>().unwrap(),
            ArticleVerdict::Uncertain
        );
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "probably fine".parse::<ClaimAssessment>().unwrap_err();
        assert_eq!(err.kind, "assessment");
        assert!(serde_json::from_str::<ArticleVerdict>("\"trustworthy\"").is_err());
    }

    #[test]
    fn labels_serialize_in_canonical_form() {
        for verdict in ArticleVerdict::ALL {
            let json = serde_json::to_string(verdict).unwrap();
            assert_eq!(json, format!("\"{}\"", verdict.as_str()));
            let back: ArticleVerdict = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *verdict);
        }
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(clamp_confidence(1.7), 1.0);
        assert_eq!(clamp_confidence(-0.2), 0.0);
        assert_eq!(clamp_confidence(f64::NAN), 0.0);
        assert_eq!(clamp_confidence(0.42), 0.42);
    }
}
