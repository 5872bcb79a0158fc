//! Tag set to chip flattening

use super::chip::{Chip, ChipLimit, ChipSummary, RenderMode, RenderOptions};
use crate::config::RenderConfig;
use crate::normalize::{format_value, is_malformed, truncate_label, value_items};
use shared::models::{AssetTag, TagValue};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A tag is titled when its key is canonical or it came from a framework
fn is_titled(tag: &AssetTag) -> bool {
    tag.key.is_canonical() || tag.is_framework_derived()
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        // lowercase before uppercase on ties
        .then_with(|| b.cmp(a))
}

/// Order titled tags by title within the slots they occupy
///
/// Untitled tags keep their exact positions. Titled tags are stably sorted
/// and written back into the positions titled tags held.
pub fn sort_tags(tags: &[AssetTag]) -> Vec<&AssetTag> {
    let mut ordered: Vec<&AssetTag> = tags.iter().collect();
    let slots: Vec<usize> = ordered
        .iter()
        .enumerate()
        .filter(|(_, tag)| is_titled(tag))
        .map(|(index, _)| index)
        .collect();

    let mut titled: Vec<&AssetTag> = slots.iter().map(|&index| ordered[index]).collect();
    titled.sort_by(|a, b| compare_titles(a.resolved_key(), b.resolved_key()));

    for (slot, tag) in slots.into_iter().zip(titled) {
        ordered[slot] = tag;
    }
    ordered
}

fn chip_color(tag: &AssetTag, config: &RenderConfig) -> String {
    tag.template()
        .and_then(|template| template.hex.as_deref())
        .map(str::trim)
        .filter(|hex| !hex.is_empty())
        .unwrap_or(config.fallback_color.as_str())
        .to_string()
}

fn displayable<'a>(tags: &'a [AssetTag]) -> impl Iterator<Item = (&'a AssetTag, &'a TagValue)> {
    sort_tags(tags).into_iter().filter_map(|tag| {
        if is_malformed(tag) {
            tracing::debug!(uuid = %tag.uuid, key = %tag.key, "skipping tag without key or value");
            return None;
        }
        tag.value.as_ref().map(|value| (tag, value))
    })
}

fn grouped_chips(tags: &[AssetTag], options: &RenderOptions, config: &RenderConfig) -> Vec<Chip> {
    let mut seen = HashSet::new();
    displayable(tags)
        .filter(|(tag, _)| !options.dedupe_keys || seen.insert(tag.resolved_key()))
        .map(|(tag, value)| {
            let key = tag.resolved_key();
            let label = format!("{}: {}", key, format_value(value));
            let label = if options.truncate {
                truncate_label(&label, config.max_label_chars)
            } else {
                label
            };
            Chip::tag(label, chip_color(tag, config), key)
        })
        .collect()
}

fn exploded_chips(tags: &[AssetTag], config: &RenderConfig) -> Vec<Chip> {
    displayable(tags)
        .flat_map(|(tag, value)| {
            let color = chip_color(tag, config);
            let key = tag.resolved_key();
            value_items(value)
                .into_iter()
                .map(move |item| Chip::tag(item, color.clone(), key))
        })
        .collect()
}

/// Flatten a tag set into display chips
pub fn render(tags: &[AssetTag], options: &RenderOptions, config: &RenderConfig) -> ChipSummary {
    let mut chips = match options.mode {
        RenderMode::Grouped => grouped_chips(tags, options, config),
        RenderMode::Exploded => exploded_chips(tags, config),
    };
    let total = chips.len();

    let elided = match options.limit {
        ChipLimit::Max(max) if total > max => {
            chips.truncate(max);
            total - max
        }
        _ => 0,
    };

    if elided > 0 {
        chips.push(Chip::overflow(elided, config));
    } else if total == 0 && options.placeholder {
        chips.push(Chip::placeholder(config));
    }

    ChipSummary {
        chips,
        total,
        elided,
    }
}

/// Every tag with its full value, repeated keys included, no limit, no
/// truncation
pub fn detail(tags: &[AssetTag], config: &RenderConfig) -> ChipSummary {
    let options = RenderOptions::grouped()
        .untruncated()
        .keep_duplicate_keys()
        .with_limit(ChipLimit::Unlimited);
    render(tags, &options, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChipKind;
    use shared::models::{TagFramework, TagKey, TagTemplate, ValueType};

    fn subject_framework() -> TagFramework {
        TagFramework::new("fw-1", "Curriculum")
            .with_template(
                TagTemplate::new("Subject", ValueType::Multiselect)
                    .with_options(["Bio", "Chem"])
                    .with_hex("#FF0000"),
            )
            .with_template(TagTemplate::new("License", ValueType::Dropdown).with_hex("#00FF00"))
    }

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn test_grouped_labels_and_colors() {
        let fw = subject_framework();
        let tags = vec![
            AssetTag::new("Subject", vec!["Bio", "Chem"]).with_framework(fw.clone()),
            AssetTag::new("Grade", 7i64),
        ];
        let summary = render(&tags, &RenderOptions::grouped(), &config());
        assert_eq!(summary.labels(), vec!["Subject: Bio, Chem", "Grade: 7"]);
        assert_eq!(summary.chips[0].color, "#FF0000");
        assert_eq!(summary.chips[1].color, "#9E9E9E");
        assert_eq!(summary.total, 2);
        assert!(summary.overflow().is_none());
    }

    #[test]
    fn test_grouped_truncates_long_labels() {
        let tags = vec![AssetTag::new("Title", "x".repeat(60))];
        let summary = render(&tags, &RenderOptions::grouped(), &config());
        let label = &summary.chips[0].label;
        assert_eq!(label.chars().count(), 43);
        assert!(label.ends_with("..."));

        let full = render(&tags, &RenderOptions::grouped().untruncated(), &config());
        assert_eq!(full.chips[0].label, format!("Title: {}", "x".repeat(60)));
    }

    #[test]
    fn test_no_value_tags_skipped() {
        let tags = vec![
            AssetTag::new("Empty", ""),
            AssetTag::new("Blank", Vec::<String>::new()),
            AssetTag {
                value: None,
                ..AssetTag::new("Missing", "x")
            },
            AssetTag::new("", "orphan"),
            AssetTag::new("Kept", "yes"),
        ];
        let summary = render(&tags, &RenderOptions::grouped(), &config());
        assert_eq!(summary.labels(), vec!["Kept: yes"]);
    }

    #[test]
    fn test_grouped_collapses_duplicate_keys() {
        let tags = vec![
            AssetTag::new("Grade", "7"),
            AssetTag::new(TagKey::canonical("k-1", "Grade"), "8"),
        ];
        let summary = render(&tags, &RenderOptions::grouped(), &config());
        assert_eq!(summary.total, 1);
    }

    #[test]
    fn test_overflow_bound() {
        let tags: Vec<AssetTag> = (0..7)
            .map(|n| AssetTag::new(format!("k{}", n), "v"))
            .collect();
        for max in 0..10 {
            let summary = render(&tags, &RenderOptions::grouped().with_max(max), &config());
            assert!(summary.tag_chips().count() <= max);
            assert_eq!(summary.overflow().is_some(), tags.len() > max);
            if let Some(chip) = summary.overflow() {
                assert_eq!(chip.label, format!("+{} more", tags.len() - max));
                assert_eq!(chip.color, "#757575");
                assert_eq!(summary.chips.last(), Some(chip));
            }
        }
    }

    #[test]
    fn test_exploded_cardinality() {
        let fw = subject_framework();
        let tags = vec![
            AssetTag::new("Subject", vec!["Bio", "Chem", "Phys"]).with_framework(fw),
            AssetTag::new("Grade", 7i64),
            AssetTag::new("Public", true),
            AssetTag::new("Empty", Vec::<String>::new()),
        ];
        let summary = render(&tags, &RenderOptions::exploded(), &config());
        assert_eq!(summary.total, 5);
        assert_eq!(summary.labels(), vec!["Bio", "Chem", "Phys", "7", "true"]);
        assert!(summary.chips[..3].iter().all(|chip| chip.color == "#FF0000"));
        assert_eq!(summary.chips[3].key.as_deref(), Some("Grade"));
    }

    #[test]
    fn test_exploded_overflow() {
        let tags = vec![AssetTag::new("Subject", vec!["a", "b", "c", "d"])];
        let summary = render(&tags, &RenderOptions::exploded().with_max(2), &config());
        assert_eq!(summary.labels(), vec!["a", "b", "+2 more"]);
        assert_eq!(summary.elided, 2);
    }

    #[test]
    fn test_placeholder_only_when_requested() {
        let tags = vec![AssetTag::new("Empty", "")];
        let quiet = render(&tags, &RenderOptions::grouped(), &config());
        assert!(quiet.chips.is_empty());
        assert!(quiet.is_empty());

        let shown = render(&tags, &RenderOptions::grouped().with_placeholder(), &config());
        let chip = shown.placeholder().unwrap();
        assert_eq!(chip.kind, ChipKind::Placeholder);
        assert_eq!(chip.label, "No associated tags");
    }

    #[test]
    fn test_sort_titled_tags_in_their_slots() {
        let fw = subject_framework();
        let tags = vec![
            AssetTag::new("zeta", "1"),
            AssetTag::new("Subject", vec!["Bio"]).with_framework(fw.clone()),
            AssetTag::new("alpha", "2"),
            AssetTag::new(TagKey::canonical("k-1", "License"), "CC-BY"),
            AssetTag::new(TagKey::canonical("k-2", "audience"), "teachers"),
        ];
        let keys: Vec<&str> = sort_tags(&tags).iter().map(|t| t.resolved_key()).collect();
        assert_eq!(keys, vec!["zeta", "audience", "alpha", "License", "Subject"]);
    }

    #[test]
    fn test_sort_case_tie_break() {
        let fw = subject_framework();
        let tags = vec![
            AssetTag::new(TagKey::canonical("k-1", "Grade"), "1").with_framework(fw.clone()),
            AssetTag::new(TagKey::canonical("k-2", "grade"), "2").with_framework(fw),
        ];
        let keys: Vec<&str> = sort_tags(&tags).iter().map(|t| t.resolved_key()).collect();
        assert_eq!(keys, vec!["grade", "Grade"]);
    }

    #[test]
    fn test_detail_ignores_limit() {
        let tags: Vec<AssetTag> = (0..5)
            .map(|n| AssetTag::new(format!("key{}", n), "y".repeat(50)))
            .collect();
        let summary = detail(&tags, &config());
        assert_eq!(summary.chips.len(), 5);
        assert!(summary.overflow().is_none());
        assert!(summary.chips.iter().all(|chip| !chip.label.ends_with("...")));
    }

    #[test]
    fn test_detail_lists_every_tag_with_a_repeated_key() {
        let tags = vec![
            AssetTag::new("Grade", 7i64),
            AssetTag::new(TagKey::canonical("k-1", "Grade"), 8i64),
        ];
        let summary = detail(&tags, &config());
        assert_eq!(summary.labels(), vec!["Grade: 7", "Grade: 8"]);

        let summary = render(&tags, &RenderOptions::grouped(), &config());
        assert_eq!(summary.labels(), vec!["Grade: 7"]);
    }
}
