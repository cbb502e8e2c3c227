use std::fmt;

use bson::Document;
use serde::Serialize;

use crate::integrity::count_by_kind;
use flextasks::RecordKind;

/// Number of records of each kind a run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub tasks: usize,
    pub messages: usize,
    pub ratings: usize,
}

impl SeedSummary {
    /// Counts the classifiable documents in a collection snapshot.
    pub fn from_documents(documents: &[Document]) -> Self {
        let counts = count_by_kind(documents);
        let mut summary = Self::default();
        for kind in RecordKind::ALL {
            *summary.slot(kind) = counts.get(&kind).copied().unwrap_or(0);
        }
        summary
    }

    pub fn record(&mut self, kind: RecordKind) {
        *self.slot(kind) += 1;
    }

    pub fn get(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::User => self.users,
            RecordKind::Task => self.tasks,
            RecordKind::Message => self.messages,
            RecordKind::Rating => self.ratings,
        }
    }

    pub fn total(&self) -> usize {
        self.users + self.tasks + self.messages + self.ratings
    }

    fn slot(&mut self, kind: RecordKind) -> &mut usize {
        match kind {
            RecordKind::User => &mut self.users,
            RecordKind::Task => &mut self.tasks,
            RecordKind::Message => &mut self.messages,
            RecordKind::Rating => &mut self.ratings,
        }
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records inserted:")?;
        for (label, count) in [
            ("Users", self.users),
            ("Tasks", self.tasks),
            ("Messages", self.messages),
            ("Ratings", self.ratings),
        ] {
            let noun = if count == 1 { "document" } else { "documents" };
            writeln!(f, "  - {label}: {count} {noun}")?;
        }
        write!(f, "  Total: {}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_record_and_total() {
        let mut summary = SeedSummary::default();
        summary.record(RecordKind::User);
        summary.record(RecordKind::User);
        summary.record(RecordKind::Rating);

        assert_eq!(summary.get(RecordKind::User), 2);
        assert_eq!(summary.get(RecordKind::Rating), 1);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_display_pluralizes() {
        let summary = SeedSummary {
            users: 4,
            tasks: 3,
            messages: 2,
            ratings: 1,
        };
        let text = summary.to_string();

        assert!(text.contains("  - Users: 4 documents"));
        assert!(text.contains("  - Ratings: 1 document\n"));
        assert!(text.ends_with("Total: 10"));
    }

    #[test]
    fn test_from_documents_ignores_unknown_shapes() {
        let docs = vec![
            doc! { "role": "client" },
            doc! { "title": "t" },
            doc! { "something": "else" },
        ];

        let summary = SeedSummary::from_documents(&docs);

        assert_eq!(summary.users, 1);
        assert_eq!(summary.tasks, 1);
        assert_eq!(summary.total(), 2);
    }
}
