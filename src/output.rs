use std::fmt::Write;

use crate::summary::Summary;

/// Render the statistics of a run.
///
/// - `json = true`: a pretty-printed JSON object.
/// - `json = false`: a human-readable report.
pub fn format_summary(summary: &Summary, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(summary)?);
    }

    let mut out = String::new();
    writeln!(out, "Code stats").unwrap();
    writeln!(out, "==========").unwrap();
    writeln!(
        out,
        "  {} classes, {} interfaces, {} traits",
        summary.classes, summary.interfaces, summary.traits
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  Functions: {}", summary.function_count()).unwrap();
    writeln!(
        out,
        "    {} public, {} protected, {} private",
        summary.functions.public, summary.functions.protected, summary.functions.private
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "  Attributes: {} ({} typed)",
        summary.attribute_count(),
        summary.typed_attribute_count()
    )
    .unwrap();
    writeln!(
        out,
        "    {} public ({} typed), {} protected ({} typed), {} private ({} typed)",
        summary.attributes.public,
        summary.typed_attributes.public,
        summary.attributes.protected,
        summary.typed_attributes.protected,
        summary.attributes.private,
        summary.typed_attributes.private,
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "  Functions per class: {:.2}",
        summary.functions_per_class
    )
    .unwrap();
    writeln!(
        out,
        "  Attributes per class: {:.2}",
        summary.attributes_per_class
    )
    .unwrap();
    Ok(out)
}

/// Print the statistics of a run to stdout.
pub fn print_summary(summary: &Summary, json: bool) -> anyhow::Result<()> {
    print!("{}", format_summary(summary, json)?);
    if json {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::VisibilityCounts;

    fn sample() -> Summary {
        Summary {
            classes: 2,
            interfaces: 1,
            traits: 0,
            functions: VisibilityCounts {
                public: 3,
                protected: 0,
                private: 1,
            },
            attributes: VisibilityCounts {
                public: 1,
                protected: 0,
                private: 2,
            },
            typed_attributes: VisibilityCounts {
                public: 1,
                protected: 0,
                private: 0,
            },
            functions_per_class: 2.0,
            attributes_per_class: 1.5,
        }
    }

    #[test]
    fn test_human_readable_summary() {
        let text = format_summary(&sample(), false).unwrap();
        assert!(text.contains("2 classes, 1 interfaces, 0 traits"));
        assert!(text.contains("Functions: 4"));
        assert!(text.contains("Attributes: 3 (1 typed)"));
        assert!(text.contains("Attributes per class: 1.50"));
    }

    #[test]
    fn test_json_summary() {
        let text = format_summary(&sample(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["classes"], 2);
        assert_eq!(value["functions"]["private"], 1);
        assert_eq!(value["functions_per_class"], 2.0);
    }
}
