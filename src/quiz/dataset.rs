use rayon::iter::{
    IntoParallelIterator,
    ParallelIterator,
};

use crate::{
    core::models::{
        fields,
        ExamplePair,
        Record,
    },
    notion::{
        properties::{
            number_value,
            status_value,
            text_value,
        },
        RawPage,
    },
};

/// Builds the master table from fetched pages, keeping the fetch order
/// (remote last-edited ascending).
pub fn build_records(pages: Vec<RawPage>) -> Vec<Record> {
    pages.into_par_iter().map(build_record).collect()
}

fn build_record(page: RawPage) -> Record {
    let RawPage { id, properties } = page;
    let property = |name: &str| properties.get(name);

    let mut examples = Vec::new();
    for slot in 1..=fields::EXAMPLE_SLOTS {
        let front = text_value(property(&fields::example_front(slot)));
        let back = text_value(property(&fields::example_back(slot)));
        if !front.is_empty() || !back.is_empty() {
            examples.push(ExamplePair { front, back });
        }
    }

    let attempted = text_value(property(fields::ATTEMPTED));

    Record {
        page_id: id,
        front: text_value(property(fields::FRONT)),
        back: text_value(property(fields::BACK)),
        note: text_value(property(fields::NOTE)),
        part_of_speech: text_value(property(fields::PART_OF_SPEECH)),
        status: status_value(property(fields::STATUS)),
        mistake_count: number_value(property(fields::MISTAKES)).max(0.0) as u32,
        attempted_at: (!attempted.is_empty()).then_some(attempted),
        examples,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn page(id: &str, properties: serde_json::Value) -> RawPage {
        serde_json::from_value(json!({ "id": id, "properties": properties })).unwrap()
    }

    #[test]
    fn test_build_record_full_page() {
        let pages = vec![page(
            "page-1",
            json!({
                "英単語": { "type": "title", "title": [{ "plain_text": "run" }] },
                "日本語": { "type": "rich_text", "rich_text": [{ "plain_text": "走る" }] },
                "メモ": { "type": "rich_text", "rich_text": [{ "plain_text": "覚えにくい" }] },
                "品詞": { "type": "select", "select": { "name": "動詞" } },
                "正誤": { "type": "status", "status": { "name": "誤" } },
                "間違えた回数": { "type": "number", "number": 2 },
                "やった日": { "type": "date", "date": { "start": "2024-01-15T10:00:00.000+00:00" } },
                "例文英語1": { "type": "rich_text", "rich_text": [{ "plain_text": "I run." }] },
                "例文日本語1": { "type": "rich_text", "rich_text": [{ "plain_text": "私は走る。" }] },
                "例文英語3": { "type": "rich_text", "rich_text": [{ "plain_text": "Run!" }] }
            }),
        )];

        let records = build_records(pages);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.page_id, "page-1");
        assert_eq!(record.front, "run");
        assert_eq!(record.back, "走る");
        assert_eq!(record.note, "覚えにくい");
        assert_eq!(record.part_of_speech, "動詞");
        assert_eq!(record.status, "誤");
        assert_eq!(record.mistake_count, 2);
        assert_eq!(record.attempted_at.as_deref(), Some("2024-01-15T10:00:00.000+00:00"));
        // Slot 2 is skipped entirely, slot 3 keeps its half-filled pair
        assert_eq!(record.examples.len(), 2);
        assert_eq!(record.examples[0].front, "I run.");
        assert_eq!(record.examples[0].back, "私は走る。");
        assert_eq!(record.examples[1].front, "Run!");
        assert_eq!(record.examples[1].back, "");
    }

    #[test]
    fn test_build_record_defaults() {
        let records = build_records(vec![page("page-2", json!({}))]);

        let record = &records[0];
        assert_eq!(record.front, "");
        assert_eq!(record.back, "");
        assert_eq!(record.status, "");
        assert!(record.is_unanswered());
        assert_eq!(record.mistake_count, 0);
        assert!(record.attempted_at.is_none());
        assert!(record.examples.is_empty());
    }

    #[test]
    fn test_build_records_keeps_order_and_clamps_counts() {
        let pages = vec![
            page("a", json!({ "間違えた回数": { "type": "number", "number": -3 } })),
            page("b", json!({ "間違えた回数": { "type": "number", "number": 2.9 } })),
            page("c", json!({ "間違えた回数": { "type": "number", "number": null } })),
        ];

        let records = build_records(pages);
        let ids: Vec<&str> = records.iter().map(|r| r.page_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(records[0].mistake_count, 0);
        assert_eq!(records[1].mistake_count, 2);
        assert_eq!(records[2].mistake_count, 0);
    }

    #[test]
    fn test_build_records_empty_input() {
        assert!(build_records(Vec::new()).is_empty());
    }
}
