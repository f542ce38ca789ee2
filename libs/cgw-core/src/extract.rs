//! Grammar point page extraction.
//!
//! A grammar point page interleaves structure blocks (`div.jiegou`) with
//! example groups (`div.liju`). Each group holds one list whose items are
//! either independent examples or, when the list is marked `dialog`, the
//! lines of a single conversation.
//!
//! ```html
//! <h1>Expressing "good"</h1>
//! <div class="jiegou">Subj. + 很 + Adj.</div>
//! <div class="liju">
//!   <ul>
//!     <li class="o">好<span class="pinyin">hǎo</span><span class="trans">Good</span></li>
//!   </ul>
//! </div>
//! ```

use crate::error::Result;
use crate::html::{full_text, has_class, selector, stripped_text};
use crate::romanize::to_tone_pinyin;
use crate::types::{CardRecord, PageContent, TemplateKind};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

/// Anki renders fields as HTML, so dialog lines are joined with a tag.
pub const LINE_BREAK: &str = "<br>";

const VALID_MARKER: &str = "o";
const INVALID_MARKER: &str = "x";
const DIALOG_MARKER: &str = "dialog";

/// Values pulled out of one list item.
///
/// `None` means the span was not there at all; `Some("")` means it was there
/// but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFields {
    /// Text left after the spans are taken out, with all whitespace removed.
    pub hanzi: String,
    pub pinyin: Option<String>,
    pub translation: Option<String>,
    pub explanation: Option<String>,
}

struct DialogLine {
    speaker: String,
    fields: ItemFields,
}

/// Parses grammar point pages into cards.
pub struct Extractor {
    title: Selector,
    blocks: Selector,
    list: Selector,
    item: Selector,
    pinyin: Selector,
    trans: Selector,
    expl: Selector,
    speaker: Selector,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: selector("h1")?,
            blocks: selector("div.jiegou, div.liju")?,
            list: selector("ul")?,
            item: selector("li")?,
            pinyin: selector("span.pinyin")?,
            trans: selector("span.trans")?,
            expl: selector("span.expl")?,
            speaker: selector("span.speaker")?,
        })
    }

    /// Extract cards from every page, preserving page order.
    pub fn parse_pages(&self, pages: &[PageContent]) -> Vec<CardRecord> {
        pages.iter().flat_map(|page| self.parse_page(page)).collect()
    }

    /// Extract every card on one grammar point page.
    pub fn parse_page(&self, page: &PageContent) -> Vec<CardRecord> {
        let document = Html::parse_document(&page.html);
        let title = document
            .select(&self.title)
            .next()
            .map(stripped_text)
            .unwrap_or_default();

        let mut cards = Vec::new();
        // Structure blocks apply to every group after them until the next one.
        let mut structure = String::new();

        for block in document.select(&self.blocks) {
            if has_class(block, "jiegou") {
                structure = stripped_text(block);
                continue;
            }

            let Some(list) = block.select(&self.list).next() else {
                debug!("Example group without a list on page {}", page.url);
                continue;
            };

            let draft = CardDraft {
                page,
                title: &title,
                structure: &structure,
            };

            if has_class(list, DIALOG_MARKER) {
                if let Some(card) = self.parse_dialog(list, &draft) {
                    cards.push(card);
                }
            } else {
                for li in list.select(&self.item) {
                    if let Some(card) = self.parse_example(li, &draft) {
                        cards.push(card);
                    }
                }
            }
        }

        cards
    }

    /// Pull pinyin, translation and explanation out of a list item; what is
    /// left over is the hanzi.
    pub fn extract_item(&self, li: ElementRef<'_>) -> ItemFields {
        self.extract_item_excluding(li, Vec::new())
    }

    fn extract_item_excluding<'a>(
        &self,
        li: ElementRef<'a>,
        mut claimed: Vec<ElementRef<'a>>,
    ) -> ItemFields {
        let pinyin = find_unclaimed(li, &self.pinyin, &claimed);
        let trans = find_unclaimed(li, &self.trans, &claimed);
        let expl = find_unclaimed(li, &self.expl, &claimed);
        claimed.extend([pinyin, trans, expl].into_iter().flatten());

        let mut rest = String::new();
        remaining_text(li, &claimed, &mut rest);

        ItemFields {
            hanzi: rest.chars().filter(|c| !c.is_whitespace()).collect(),
            pinyin: pinyin.map(full_text),
            translation: trans.map(full_text),
            explanation: expl.map(full_text),
        }
    }

    fn parse_example(&self, li: ElementRef<'_>, draft: &CardDraft<'_>) -> Option<CardRecord> {
        let fields = self.extract_item(li);

        let kind = if has_class(li, VALID_MARKER) {
            TemplateKind::ValidExample
        } else if has_class(li, INVALID_MARKER) {
            TemplateKind::InvalidExample
        } else {
            TemplateKind::Translation
        };

        if fields.hanzi.is_empty() {
            warn!(
                "Malformed example on page {} does not have required hanzi (pinyin: {:?}, translation: {:?})",
                draft.page.url, fields.pinyin, fields.translation
            );
            return None;
        }

        let pinyin = fields
            .pinyin
            .unwrap_or_else(|| to_tone_pinyin(&fields.hanzi));

        Some(draft.card(
            kind,
            fields.hanzi,
            pinyin,
            fields.translation,
            fields.explanation,
        ))
    }

    fn parse_dialog(&self, list: ElementRef<'_>, draft: &CardDraft<'_>) -> Option<CardRecord> {
        let mut lines = Vec::new();

        for li in list.select(&self.item) {
            let Some(speaker) = find_unclaimed(li, &self.speaker, &[]) else {
                warn!(
                    "Malformed dialog example on page {} does not have required speaker tag",
                    draft.page.url
                );
                continue;
            };

            let fields = self.extract_item_excluding(li, vec![speaker]);
            if fields.hanzi.is_empty() {
                warn!(
                    "Malformed dialog line on page {} does not have required hanzi",
                    draft.page.url
                );
                continue;
            }

            lines.push(DialogLine {
                speaker: stripped_text(speaker),
                fields,
            });
        }

        if lines.is_empty() {
            warn!(
                "Malformed dialog on page {} has no usable lines",
                draft.page.url
            );
            return None;
        }

        let hanzi = lines
            .iter()
            .map(|l| with_speaker(&l.speaker, &l.fields.hanzi))
            .collect::<Vec<_>>()
            .join(LINE_BREAK)
            .trim()
            .to_string();

        let pinyin = join_present(&lines, |f| f.pinyin.as_deref()).unwrap_or_else(|| {
            lines
                .iter()
                .map(|l| with_speaker(&l.speaker, &to_tone_pinyin(&l.fields.hanzi)))
                .collect::<Vec<_>>()
                .join(LINE_BREAK)
        });

        let translation = join_present(&lines, |f| f.translation.as_deref());
        let explanation = join_present(&lines, |f| f.explanation.as_deref());

        Some(draft.card(
            TemplateKind::Translation,
            hanzi,
            pinyin,
            translation,
            explanation,
        ))
    }
}

/// Page-level values shared by every card from one example group.
struct CardDraft<'p> {
    page: &'p PageContent,
    title: &'p str,
    structure: &'p str,
}

impl CardDraft<'_> {
    fn card(
        &self,
        template_kind: TemplateKind,
        hanzi: String,
        pinyin: String,
        translation: Option<String>,
        notes: Option<String>,
    ) -> CardRecord {
        CardRecord {
            template_kind,
            hanzi,
            pinyin,
            translation: translation.unwrap_or_default(),
            notes: notes.unwrap_or_default(),
            structure: self.structure.to_string(),
            source_url: self.page.url.clone(),
            article_title: self.title.to_string(),
        }
    }
}

fn with_speaker(speaker: &str, text: &str) -> String {
    format!("{} {}", speaker, text)
}

/// Join the lines that carry a value, each prefixed with its speaker.
/// `None` when no line carries one.
fn join_present(
    lines: &[DialogLine],
    get: impl Fn(&ItemFields) -> Option<&str>,
) -> Option<String> {
    let present: Vec<String> = lines
        .iter()
        .filter_map(|l| get(&l.fields).map(|v| with_speaker(&l.speaker, v)))
        .collect();

    if present.is_empty() {
        None
    } else {
        Some(present.join(LINE_BREAK))
    }
}

/// First match under `root` that is not inside an already claimed element.
fn find_unclaimed<'a>(
    root: ElementRef<'a>,
    sel: &Selector,
    claimed: &[ElementRef<'a>],
) -> Option<ElementRef<'a>> {
    root.select(sel).find(|el| {
        !claimed.contains(el)
            && !el
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| claimed.contains(&a))
    })
}

fn remaining_text(el: ElementRef<'_>, claimed: &[ElementRef<'_>], out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !claimed.contains(&child_el) {
                        remaining_text(child_el, claimed, out);
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(html: &str) -> PageContent {
        PageContent::new("http://test.url", html)
    }

    fn parse(html: &str) -> Vec<CardRecord> {
        Extractor::new().unwrap().parse_page(&page(html))
    }

    fn item_fields(li_html: &str) -> ItemFields {
        let extractor = Extractor::new().unwrap();
        let document = Html::parse_document(&format!("<ul>{li_html}</ul>"));
        let li = document.select(&extractor.item).next().unwrap();
        extractor.extract_item(li)
    }

    #[test]
    fn extract_item_takes_all_spans() {
        let fields = item_fields(
            r#"<li>
                我
                <span class="pinyin">wǒ</span>
                <span class="trans">I</span>
                <span class="expl">explanation</span>
            </li>"#,
        );
        assert_eq!(
            fields,
            ItemFields {
                hanzi: "我".into(),
                pinyin: Some("wǒ".into()),
                translation: Some("I".into()),
                explanation: Some("explanation".into()),
            }
        );
    }

    #[test]
    fn extract_item_marks_missing_spans_absent() {
        let fields = item_fields(r#"<li>我<span class="trans">I</span></li>"#);
        assert_eq!(fields.hanzi, "我");
        assert_eq!(fields.pinyin, None);
        assert_eq!(fields.translation, Some("I".into()));
        assert_eq!(fields.explanation, None);
    }

    #[test]
    fn extract_item_keeps_empty_span_distinct_from_absent() {
        let fields = item_fields(r#"<li>我<span class="pinyin"></span></li>"#);
        assert_eq!(fields.pinyin, Some(String::new()));
    }

    #[test]
    fn extract_item_strips_all_whitespace_from_hanzi() {
        let fields = item_fields("<li> 我 是\n<strong>学生</strong>\t。</li>");
        assert_eq!(fields.hanzi, "我是学生。");
    }

    #[test]
    fn standard_examples_are_classified_by_marker() {
        let html = r#"
        <html>
            <h1>Grammar Point Title</h1>
            <div class="jiegou">Structure + Verb</div>
            <div class="liju">
                <ul>
                    <li class="o">
                        <span class="pinyin">hǎo</span><span class="trans">Good</span>好
                    </li>
                    <li class="x">
                        <span class="pinyin">bù hǎo</span><span class="trans">Bad</span>不好
                    </li>
                    <li>
                        <span class="pinyin">hěn hǎo</span><span class="trans">Very good</span>很好
                    </li>
                </ul>
            </div>
        </html>
        "#;
        let cards = parse(html);

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].template_kind, TemplateKind::ValidExample);
        assert_eq!(cards[0].hanzi, "好");
        assert_eq!(cards[0].pinyin, "hǎo");
        assert_eq!(cards[0].translation, "Good");
        assert_eq!(cards[0].structure, "Structure + Verb");
        assert_eq!(cards[0].article_title, "Grammar Point Title");
        assert_eq!(cards[0].source_url, "http://test.url");
        assert_eq!(cards[1].template_kind, TemplateKind::InvalidExample);
        assert_eq!(cards[1].hanzi, "不好");
        assert_eq!(cards[2].template_kind, TemplateKind::Translation);
    }

    #[test]
    fn invalid_example_without_pinyin_gets_synthesized_pinyin() {
        let html = r#"
        <h1>Title</h1>
        <div class="liju"><ul><li class="x">不好</li></ul></div>
        "#;
        let cards = parse(html);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].template_kind, TemplateKind::InvalidExample);
        assert!(cards[0].pinyin.contains("bù"));
        assert!(cards[0].pinyin.contains("hǎo"));
        assert_eq!(cards[0].translation, "");
        assert_eq!(cards[0].notes, "");
    }

    #[test]
    fn fallback_pinyin_for_translation_example() {
        let html = r#"
        <h1>Title</h1>
        <div class="liju"><ul><li>你好<span class="trans">Hello</span></li></ul></div>
        "#;
        let cards = parse(html);

        assert_eq!(cards.len(), 1);
        assert!(cards[0].pinyin.contains("nǐ"));
        assert!(cards[0].pinyin.contains("hǎo"));
    }

    #[test]
    fn dialog_is_aggregated_into_one_card() {
        let html = r#"
        <html>
            <h1>Dialog Title</h1>
            <div class="jiegou">Dialog Struct</div>
            <div class="liju">
                <ul class="dialog">
                    <li>
                        <span class="speaker">A:</span>
                        <span class="pinyin">nǐ hǎo</span><span class="trans">Hello</span>你好
                    </li>
                    <li>
                        <span class="speaker">B:</span>
                        <span class="pinyin">hǎo</span><span class="trans">Hi</span>好
                    </li>
                </ul>
            </div>
        </html>
        "#;
        let cards = parse(html);

        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.template_kind, TemplateKind::Translation);
        assert_eq!(card.hanzi, "A: 你好<br>B: 好");
        assert_eq!(card.pinyin, "A: nǐ hǎo<br>B: hǎo");
        assert_eq!(card.translation, "A: Hello<br>B: Hi");
        assert_eq!(card.notes, "");
        assert_eq!(card.structure, "Dialog Struct");
    }

    #[test]
    fn dialog_line_without_speaker_is_skipped_alone() {
        let html = r#"
        <h1>T</h1>
        <div class="liju">
            <ul class="dialog">
                <li><span class="speaker">A:</span>你好<span class="trans">Hello</span></li>
                <li>没有<span class="trans">No speaker</span></li>
                <li><span class="speaker">B:</span>好<span class="trans">Hi</span></li>
            </ul>
        </div>
        "#;
        let cards = parse(html);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].hanzi, "A: 你好<br>B: 好");
        assert_eq!(cards[0].translation, "A: Hello<br>B: Hi");
    }

    #[test]
    fn dialog_joins_only_present_values_in_order() {
        let html = r#"
        <h1>T</h1>
        <div class="liju">
            <ul class="dialog">
                <li><span class="speaker">A:</span>一<span class="expl">first</span></li>
                <li><span class="speaker">B:</span>二</li>
                <li><span class="speaker">C:</span>三<span class="expl"></span></li>
            </ul>
        </div>
        "#;
        let cards = parse(html);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].hanzi, "A: 一<br>B: 二<br>C: 三");
        assert_eq!(cards[0].notes, "A: first<br>C: ");
        assert_eq!(cards[0].translation, "");
        assert_eq!(cards[0].pinyin, "A: yī<br>B: èr<br>C: sān");
    }

    #[test]
    fn dialog_without_usable_lines_is_dropped() {
        let html = r#"
        <div class="liju"><ul class="dialog"><li>你好</li><li>好</li></ul></div>
        "#;
        assert!(parse(html).is_empty());
    }

    #[test]
    fn item_with_only_spans_is_dropped() {
        let html = r#"
        <div class="liju">
            <ul>
                <li><span class="pinyin">hǎo</span><span class="trans">Good</span></li>
                <li>好</li>
            </ul>
        </div>
        "#;
        let cards = parse(html);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].hanzi, "好");
    }

    #[test]
    fn page_without_groups_yields_nothing() {
        assert!(parse("<html><h1>Empty</h1><p>Nothing here</p></html>").is_empty());
    }

    #[test]
    fn group_without_preceding_structure_has_empty_structure() {
        let html = r#"
        <h1>T</h1>
        <div class="liju"><ul><li>一</li></ul></div>
        <div class="jiegou">Later</div>
        <div class="liju"><ul><li>二</li></ul></div>
        "#;
        let cards = parse(html);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].structure, "");
        assert_eq!(cards[1].structure, "Later");
    }

    #[test]
    fn nearest_structure_wins() {
        let html = r#"
        <div class="jiegou">First</div>
        <div class="jiegou">Second <b>part</b></div>
        <div class="liju"><ul><li>一</li></ul></div>
        "#;
        let cards = parse(html);
        assert_eq!(cards[0].structure, "Secondpart");
    }

    #[test]
    fn page_without_title_uses_empty_title() {
        let cards = parse(r#"<div class="liju"><ul><li>好</li></ul></div>"#);
        assert_eq!(cards[0].article_title, "");
    }

    #[test]
    fn parse_pages_keeps_page_order() {
        let extractor = Extractor::new().unwrap();
        let pages = vec![
            PageContent::new("http://a", r#"<div class="liju"><ul><li>一</li></ul></div>"#),
            PageContent::new("http://b", "<p>none</p>"),
            PageContent::new("http://c", r#"<div class="liju"><ul><li>三</li></ul></div>"#),
        ];
        let cards = extractor.parse_pages(&pages);
        let urls: Vec<&str> = cards.iter().map(|c| c.source_url.as_str()).collect();
        assert_eq!(urls, vec!["http://a", "http://c"]);
    }

    #[test]
    fn emitted_hanzi_is_never_empty() {
        let html = r#"
        <div class="liju">
            <ul>
                <li> </li>
                <li><span class="trans">only</span></li>
                <li>有</li>
            </ul>
        </div>
        <div class="liju"><ul class="dialog"><li><span class="speaker">A:</span> </li></ul></div>
        "#;
        let cards = parse(html);
        assert!(cards.iter().all(|c| !c.hanzi.is_empty()));
        assert_eq!(cards.len(), 1);
    }
}
