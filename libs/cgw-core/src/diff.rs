//! Incremental diff of scraped cards against a previously generated deck.

use crate::types::{CardRecord, DiffStats, ExistingCardSnapshot, ExistingCards};

/// How a scraped card relates to the existing deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOutcome {
    New,
    Update,
    Skipped,
}

/// Classify one card. Only pinyin and translation count as content changes,
/// compared after trimming leading and trailing whitespace.
pub fn classify(card: &CardRecord, existing: Option<&ExistingCardSnapshot>) -> DiffOutcome {
    match existing {
        None => DiffOutcome::New,
        Some(old)
            if card.translation.trim() != old.translation.trim()
                || card.pinyin.trim() != old.pinyin.trim() =>
        {
            DiffOutcome::Update
        }
        Some(_) => DiffOutcome::Skipped,
    }
}

/// Split scraped cards into the ones that need exporting, keeping input order.
pub fn diff_cards(existing: &ExistingCards, scraped: Vec<CardRecord>) -> (Vec<CardRecord>, DiffStats) {
    let mut to_export = Vec::new();
    let mut stats = DiffStats::default();

    for card in scraped {
        match classify(&card, existing.get(&card.hanzi)) {
            DiffOutcome::New => {
                stats.new += 1;
                to_export.push(card);
            }
            DiffOutcome::Update => {
                stats.update += 1;
                to_export.push(card);
            }
            DiffOutcome::Skipped => stats.skipped += 1,
        }
    }

    (to_export, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TemplateKind;
    use pretty_assertions::assert_eq;

    fn card() -> CardRecord {
        CardRecord {
            template_kind: TemplateKind::Translation,
            hanzi: "你好".into(),
            pinyin: "nǐhǎo".into(),
            translation: "Hello".into(),
            notes: "A common greeting".into(),
            structure: "你好 + [Name]".into(),
            source_url: "https://resources.allsetlearning.com/chinese/grammar/ASDF1234".into(),
            article_title: "Ways to greet someone".into(),
        }
    }

    fn existing(pinyin: &str, translation: &str) -> ExistingCards {
        ExistingCards::from([(
            "你好".to_string(),
            ExistingCardSnapshot {
                pinyin: pinyin.into(),
                translation: translation.into(),
            },
        )])
    }

    #[test]
    fn all_new_against_empty_deck() {
        let (to_export, stats) = diff_cards(&ExistingCards::new(), vec![card()]);
        assert_eq!(to_export.len(), 1);
        assert_eq!(stats, DiffStats { new: 1, update: 0, skipped: 0 });
    }

    #[test]
    fn identical_card_is_skipped() {
        let (to_export, stats) = diff_cards(&existing("nǐhǎo", "Hello"), vec![card()]);
        assert!(to_export.is_empty());
        assert_eq!(stats, DiffStats { new: 0, update: 0, skipped: 1 });
    }

    #[test]
    fn changed_translation_is_exported_with_new_value() {
        let (to_export, stats) = diff_cards(&existing("nǐhǎo", "Old Translation"), vec![card()]);
        assert_eq!(stats, DiffStats { new: 0, update: 1, skipped: 0 });
        assert_eq!(to_export[0].translation, "Hello");
    }

    #[test]
    fn changed_pinyin_is_an_update() {
        let (_, stats) = diff_cards(&existing("ní hǎo", "Hello"), vec![card()]);
        assert_eq!(stats.update, 1);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let (to_export, stats) = diff_cards(&existing("nǐhǎo ", " Hello\n"), vec![card()]);
        assert!(to_export.is_empty());
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn internal_whitespace_is_a_real_change() {
        let (_, stats) = diff_cards(&existing("nǐ hǎo", "Hello"), vec![card()]);
        assert_eq!(stats.update, 1);
    }

    #[test]
    fn other_fields_do_not_trigger_update() {
        let mut changed = card();
        changed.notes = "Different notes".into();
        changed.structure = "Different".into();
        changed.article_title = "Renamed".into();
        changed.template_kind = TemplateKind::ValidExample;
        assert_eq!(
            classify(&changed, existing("nǐhǎo", "Hello").get("你好")),
            DiffOutcome::Skipped
        );
    }

    #[test]
    fn counts_sum_to_scraped_and_order_is_kept() {
        let mut other = card();
        other.hanzi = "好".into();
        let mut updated = card();
        updated.translation = "Hi".into();
        let scraped = vec![other.clone(), card(), updated.clone(), other.clone()];

        let (to_export, stats) = diff_cards(&existing("nǐhǎo", "Hello"), scraped);

        assert_eq!(stats, DiffStats { new: 2, update: 1, skipped: 1 });
        assert_eq!(stats.total(), 4);
        assert_eq!(to_export, vec![other.clone(), updated, other]);
    }
}
