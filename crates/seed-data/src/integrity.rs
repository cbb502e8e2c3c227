//! Reference checks over a seeded collection.
//!
//! Nothing in the data layer enforces that a task's `client` is a user or that a
//! message's `task` is a task. Only the insertion order guarantees it, so after a run
//! the collection is read back and every reference is resolved.

use std::collections::{HashMap, HashSet};
use std::fmt;

use bson::{Bson, Document, oid::ObjectId};
use serde::Serialize;

use flextasks::RecordKind;

/// A reference field whose target is missing or of the wrong kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// Id of the document holding the reference, if it has one.
    pub source: Option<ObjectId>,
    pub source_kind: &'static str,
    /// Dotted path of the field, e.g. `applicants.0.student`.
    pub field: String,
    pub target: Option<ObjectId>,
    pub expected: &'static str,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self
            .source
            .map(|id| id.to_hex())
            .unwrap_or_else(|| "<no id>".to_string());
        match self.target {
            Some(target) => write!(
                f,
                "{} {} field `{}` points to {} which is not a {}",
                self.source_kind, source, self.field, target, self.expected
            ),
            None => write!(
                f,
                "{} {} field `{}` is missing or not an ObjectId",
                self.source_kind, source, self.field
            ),
        }
    }
}

/// Result of checking every reference in a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Number of references that resolved.
    pub checked: usize,
    pub dangling: Vec<DanglingReference>,
    /// Documents whose shape matches no known record kind.
    pub unclassified: usize,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }
}

struct Checker<'a> {
    kinds: &'a HashMap<ObjectId, RecordKind>,
    report: IntegrityReport,
}

impl Checker<'_> {
    fn check(
        &mut self,
        document: &Document,
        source_kind: RecordKind,
        field: &str,
        value: Option<&Bson>,
        expected: RecordKind,
    ) {
        let target = match value {
            Some(Bson::ObjectId(id)) => Some(*id),
            _ => None,
        };

        if target.and_then(|id| self.kinds.get(&id)) == Some(&expected) {
            self.report.checked += 1;
            return;
        }

        self.report.dangling.push(DanglingReference {
            source: document.get_object_id("_id").ok(),
            source_kind: source_kind.as_str(),
            field: field.to_string(),
            target,
            expected: expected.as_str(),
        });
    }

    fn required(&mut self, doc: &Document, kind: RecordKind, field: &str, expected: RecordKind) {
        self.check(doc, kind, field, doc.get(field), expected);
    }

    fn optional(&mut self, doc: &Document, kind: RecordKind, field: &str, expected: RecordKind) {
        match doc.get(field) {
            None | Some(Bson::Null) => {}
            value => self.check(doc, kind, field, value, expected),
        }
    }
}

/// Resolves every reference field in `documents` against the documents themselves.
pub fn check_references(documents: &[Document]) -> IntegrityReport {
    let kinds: HashMap<ObjectId, RecordKind> = documents
        .iter()
        .filter_map(|doc| {
            let id = doc.get_object_id("_id").ok()?;
            RecordKind::classify(doc).map(|kind| (id, kind))
        })
        .collect();

    let mut checker = Checker {
        kinds: &kinds,
        report: IntegrityReport::default(),
    };

    for doc in documents {
        let Some(kind) = RecordKind::classify(doc) else {
            checker.report.unclassified += 1;
            continue;
        };

        match kind {
            RecordKind::User => {}
            RecordKind::Task => {
                checker.required(doc, kind, "client", RecordKind::User);
                checker.optional(doc, kind, "student", RecordKind::User);
                if let Ok(applicants) = doc.get_array("applicants") {
                    for (i, applicant) in applicants.iter().enumerate() {
                        let value = applicant.as_document().and_then(|a| a.get("student"));
                        let field = format!("applicants.{i}.student");
                        checker.check(doc, kind, &field, value, RecordKind::User);
                    }
                }
            }
            RecordKind::Message => {
                checker.required(doc, kind, "task", RecordKind::Task);
                checker.required(doc, kind, "sender", RecordKind::User);
                checker.required(doc, kind, "receiver", RecordKind::User);
            }
            RecordKind::Rating => {
                checker.required(doc, kind, "task", RecordKind::Task);
                checker.required(doc, kind, "ratedUser", RecordKind::User);
                checker.required(doc, kind, "ratedBy", RecordKind::User);
            }
        }
    }

    checker.report
}

/// Counts documents per record kind.
pub fn count_by_kind(documents: &[Document]) -> HashMap<RecordKind, usize> {
    let mut counts = HashMap::new();
    for kind in documents.iter().filter_map(RecordKind::classify) {
        *counts.entry(kind).or_insert(0) += 1;
    }
    counts
}

/// Ids of every document of the given kind.
pub fn ids_of_kind(documents: &[Document], kind: RecordKind) -> HashSet<ObjectId> {
    documents
        .iter()
        .filter(|doc| RecordKind::classify(doc) == Some(kind))
        .filter_map(|doc| doc.get_object_id("_id").ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn user(id: ObjectId) -> Document {
        doc! { "_id": id, "name": "u", "role": "client" }
    }

    #[test]
    fn test_resolved_references_are_clean() {
        let client = ObjectId::new();
        let student = ObjectId::new();
        let task = ObjectId::new();
        let docs = vec![
            user(client),
            user(student),
            doc! {
                "_id": task, "title": "t", "client": client, "student": student,
                "applicants": [{ "student": student, "message": "hi" }],
            },
            doc! { "_id": ObjectId::new(), "task": task, "sender": client, "receiver": student },
            doc! { "_id": ObjectId::new(), "task": task, "ratedUser": student, "ratedBy": client },
        ];

        let report = check_references(&docs);

        assert!(report.is_clean(), "{:?}", report.dangling);
        assert_eq!(report.checked, 9);
        assert_eq!(report.unclassified, 0);
    }

    #[test]
    fn test_missing_target_is_dangling() {
        let client = ObjectId::new();
        let ghost = ObjectId::new();
        let task = ObjectId::new();
        let docs = vec![
            user(client),
            doc! { "_id": task, "title": "t", "client": client, "student": ghost },
        ];

        let report = check_references(&docs);

        assert_eq!(report.dangling.len(), 1);
        let dangling = &report.dangling[0];
        assert_eq!(dangling.field, "student");
        assert_eq!(dangling.target, Some(ghost));
        assert_eq!(dangling.source, Some(task));
        assert!(dangling.to_string().contains("not a user"));
    }

    #[test]
    fn test_reference_to_wrong_kind_is_dangling() {
        let client = ObjectId::new();
        let task = ObjectId::new();
        let docs = vec![
            user(client),
            doc! { "_id": task, "title": "t", "client": client },
            // Message whose task field points at a user
            doc! { "_id": ObjectId::new(), "task": client, "sender": client, "receiver": client },
        ];

        let report = check_references(&docs);

        assert_eq!(report.dangling.len(), 1);
        assert_eq!(report.dangling[0].field, "task");
        assert_eq!(report.dangling[0].expected, "task");
    }

    #[test]
    fn test_absent_optional_student_is_fine() {
        let client = ObjectId::new();
        let docs = vec![
            user(client),
            doc! { "_id": ObjectId::new(), "title": "t", "client": client, "student": Bson::Null },
        ];

        assert!(check_references(&docs).is_clean());
    }

    #[test]
    fn test_counts_and_unclassified() {
        let client = ObjectId::new();
        let docs = vec![user(client), user(ObjectId::new()), doc! { "stray": true }];

        let counts = count_by_kind(&docs);
        assert_eq!(counts.get(&RecordKind::User), Some(&2));
        assert_eq!(counts.get(&RecordKind::Task), None);
        assert_eq!(check_references(&docs).unclassified, 1);
        assert!(ids_of_kind(&docs, RecordKind::User).contains(&client));
    }
}
