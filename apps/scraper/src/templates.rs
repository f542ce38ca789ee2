//! Note types for the three card layouts.

use cgw_core::TemplateKind;
use serde_json::{json, Value};

/// Field names, in the order `CardRecord::fields` returns them.
pub const FIELD_NAMES: [&str; 7] = [
    "中文",
    "Pinyin",
    "English",
    "Notes",
    "Grammar Construct",
    "Source URL",
    "Article Title",
];

const LESSON_INFO: &str = r#"<div class="lessonInfo">
<div class="spacer"> </div>
<div>Pattern: <span class="lessonInfoHanzi">{{Grammar Construct}}</span></div>
Article: <a href={{Source URL}}>{{Article Title}}</a>
</div>"#;

const TRANSLATION_FRONT: &str = r#"<div class="hanzi">{{中文}}</div>"#;

const TRANSLATION_BACK: &str = r#"{{FrontSide}}
<div class="spacer"> </div>
<div class="english">
    <div class="pinyin">{{Pinyin}}</div>
    <div class="spacerSmall"> </div>
    {{English}}
    <div class="spacerMedium"> </div>
    <div class="notes">{{Notes}}</div>
</div>
"#;

const EXAMPLE_FRONT: &str = r#"<div class="header">Is this sentence grammatically correct?</div>
<div class="spacer"> </div>
<div class="hanzi">{{中文}}</div>"#;

const EXAMPLE_BACK: &str = r#"<div class="hanzi">{{中文}}</div>

<div class="english">
    <div class="spacerMedium"> </div>
    <div class="pinyin">{{Pinyin}}</div>
    <div class="spacerSmall"> </div>
    {{English}}
    <div class="spacerMedium"> </div>
    {{VERDICT}}
    <div class="spacerMedium"> </div>
    <div class="notes">{{Notes}}</div>
</div>

"#;

pub const STYLING: &str = r#".card {
font-family: arial;
font-size: 30px;
text-align: center;
color: black;
background-color: white;
}

.header {
font-family: arial;
font-size: 16px;
}

.hanzi {
font-family: SimSun;
font-size: 28px;
}

.pinyin {
color: gray;
}

.translation {
font-size: 26px;
}

.lessonInfoHanzi {
font-family: SimSun;
font-size: 12px;
}

.lessonInfo {
font-family: arial;
font-size: 10px;
}

.correct, .incorrect {
font-family: arial;
font-size: 26px;
font-weight: bold;
}

.correct {
color: green;
}

.incorrect {
color: red;
}

.english {
font-family: arial;
font-size: 20px;
}

.notes {
font-family: arial;
font-size: 12px;
color: gray;
}

.spacer {
height: 20px;
}

.spacerSmall {
height: 3px;
}

.spacerMedium {
height: 10px;
}
"#;

/// Question side template.
pub fn front(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Translation => TRANSLATION_FRONT,
        TemplateKind::ValidExample | TemplateKind::InvalidExample => EXAMPLE_FRONT,
    }
}

/// Answer side template.
pub fn back(kind: TemplateKind) -> String {
    let body = match kind {
        TemplateKind::Translation => TRANSLATION_BACK.to_string(),
        TemplateKind::ValidExample => {
            EXAMPLE_BACK.replace("{{VERDICT}}", r#"<div class="correct">Correct!</div>"#)
        }
        TemplateKind::InvalidExample => {
            EXAMPLE_BACK.replace("{{VERDICT}}", r#"<div class="incorrect">Not correct!</div>"#)
        }
    };
    format!("{}\n{}", body, LESSON_INFO)
}

/// Note type entry for `col.models`.
pub fn model_json(kind: TemplateKind, deck_id: i64, modified: i64) -> Value {
    let fields: Vec<Value> = FIELD_NAMES
        .iter()
        .enumerate()
        .map(|(ord, name)| {
            json!({
                "name": name,
                "ord": ord,
                "sticky": false,
                "rtl": false,
                "font": "Arial",
                "size": 20,
                "media": []
            })
        })
        .collect();

    json!({
        "id": kind.model_id(),
        "name": kind.model_name(),
        "type": 0,
        "mod": modified,
        "usn": -1,
        "sortf": 0,
        "did": deck_id,
        "tmpls": [{
            "name": kind.template_name(),
            "ord": 0,
            "qfmt": front(kind),
            "afmt": back(kind),
            "did": null,
            "bqfmt": "",
            "bafmt": ""
        }],
        "flds": fields,
        "css": STYLING,
        "latexPre": "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage[utf8]{inputenc}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n",
        "latexPost": "\\end{document}",
        "tags": [],
        "vers": [],
        "req": [[0, "any", [0]]]
    })
}
