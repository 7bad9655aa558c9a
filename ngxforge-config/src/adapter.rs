//! Blueprint documents on top of the shared [`Format`]

use crate::blueprint::Blueprint;
use crate::error::{BlueprintError, Result};
use std::path::Path;

pub use ngxforge_core::config::Format;

/// Format of a blueprint file, by extension.
pub fn format_of(path: impl AsRef<Path>) -> Result<Format> {
    let path = path.as_ref();
    Format::from_path(path).ok_or_else(|| BlueprintError::UnknownFormat(path.display().to_string()))
}

/// Parse a blueprint, keeping the parser's own error type.
pub fn parse_blueprint(format: Format, source: &str) -> Result<Blueprint> {
    Ok(match format {
        Format::Json => serde_json::from_str(source)?,
        Format::Toml => toml::from_str(source)?,
    })
}

pub fn serialize_blueprint(format: Format, blueprint: &Blueprint) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(blueprint)?,
        Format::Toml => toml::to_string_pretty(blueprint)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{RouteBlueprint, ServerBlueprint};

    #[test]
    fn format_of_unknown_extension() {
        assert_eq!(format_of("site.toml").unwrap(), Format::Toml);
        assert!(matches!(
            format_of("site.yaml"),
            Err(BlueprintError::UnknownFormat(ref path)) if path == "site.yaml"
        ));
        assert!(format_of("Blueprint").is_err());
    }

    #[test]
    fn json_and_toml_agree() {
        let blueprint = Blueprint {
            servers: vec![ServerBlueprint {
                hostname: Some("example.com".to_string()),
                routes: vec![RouteBlueprint {
                    path: "/".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        for format in [Format::Json, Format::Toml] {
            let text = serialize_blueprint(format, &blueprint).unwrap();
            assert_eq!(parse_blueprint(format, &text).unwrap(), blueprint, "{format}");
        }
    }
}
