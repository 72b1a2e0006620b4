use crate::config::ViewConfig;
use crate::scanner::{self, ScanError, ScanReport};
use crate::table::EntryTable;
use crate::types::Column;
use std::path::PathBuf;

/// Source of the directory to scan. `None` means the user cancelled.
pub trait FolderPicker {
    fn pick(&mut self) -> Option<PathBuf>;
}

/// Where scan errors are shown.
pub trait MessageSink {
    fn error(&mut self, err: &ScanError);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Cancelled,
    Loaded { rows: usize, skipped: usize },
    Failed,
}

/// State of the folder view, owned by the front end.
#[derive(Debug)]
pub struct App {
    config: ViewConfig,
    table: EntryTable,
    root: Option<PathBuf>,
    /// Names left out of the last successful scan.
    skipped: Vec<String>,
}

impl App {
    #[must_use]
    pub fn new(config: ViewConfig) -> Self {
        App {
            config,
            table: EntryTable::new(),
            root: None,
            skipped: Vec::new(),
        }
    }

    /// Ask the picker for a folder and load it.
    pub fn open_folder(
        &mut self,
        picker: &mut dyn FolderPicker,
        messages: &mut dyn MessageSink,
    ) -> OpenOutcome {
        match picker.pick() {
            Some(path) => self.load(path, messages),
            None => {
                log::debug!("Folder selection cancelled");
                OpenOutcome::Cancelled
            }
        }
    }

    /// Scan `path` and replace the table. On error the previous rows stay.
    pub fn load(&mut self, path: PathBuf, messages: &mut dyn MessageSink) -> OpenOutcome {
        match scanner::scan_entries(&path, self.config.scan_options()) {
            Ok(report) => {
                let outcome = OpenOutcome::Loaded {
                    rows: report.entries.len(),
                    skipped: report.skipped.len(),
                };
                self.apply(report);
                outcome
            }
            Err(e) => {
                log::info!("Scan of {} failed: {e}", path.display());
                messages.error(&e);
                OpenOutcome::Failed
            }
        }
    }

    fn apply(&mut self, report: ScanReport) {
        self.table.replace(report.entries);
        if let Some(column) = self.config.initial_sort {
            self.table.sort(column);
        }
        self.root = Some(report.root);
        self.skipped = report.skipped;
    }

    /// A click on a column header.
    pub fn click_header(&mut self, column: Column) {
        self.table.sort(column);
    }

    #[must_use]
    pub fn table(&self) -> &EntryTable {
        &self.table
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[must_use]
    pub fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanErrorKind;
    use crate::types::Entry;
    use std::fs;
    use tempfile::TempDir;

    struct FakePicker(Option<PathBuf>);

    impl FolderPicker for FakePicker {
        fn pick(&mut self) -> Option<PathBuf> {
            self.0.take()
        }
    }

    #[derive(Default)]
    struct Recorder {
        errors: Vec<ScanErrorKind>,
    }

    impl MessageSink for Recorder {
        fn error(&mut self, err: &ScanError) {
            self.errors.push(err.kind());
        }
    }

    fn make_root(names: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for name in names {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }
        tmp
    }

    fn kinds(app: &App) -> Vec<&str> {
        app.table().rows().iter().map(Entry::kind).collect()
    }

    #[test]
    fn test_end_to_end_release_debug() {
        let root = make_root(&["2023-01-01_Release_v1", "2023-02-01_Debug_v2"]);
        let mut app = App::new(ViewConfig::default());
        let mut messages = Recorder::default();

        let outcome = app.open_folder(
            &mut FakePicker(Some(root.path().to_path_buf())),
            &mut messages,
        );
        assert_eq!(outcome, OpenOutcome::Loaded { rows: 2, skipped: 0 });
        assert!(messages.errors.is_empty());
        assert_eq!(app.table().last_sorted(), None);

        app.click_header(Column::Type);
        assert_eq!(kinds(&app), vec!["Debug", "Release"]);

        app.click_header(Column::Type);
        assert_eq!(kinds(&app), vec!["Release", "Debug"]);
    }

    #[test]
    fn test_cancel_is_silent() {
        let mut app = App::new(ViewConfig::default());
        let mut messages = Recorder::default();

        let outcome = app.open_folder(&mut FakePicker(None), &mut messages);
        assert_eq!(outcome, OpenOutcome::Cancelled);
        assert!(messages.errors.is_empty());
    }

    #[test]
    fn test_errors_keep_previous_rows() {
        let root = make_root(&["2023-01-01_Release_v1"]);
        let empty = TempDir::new().unwrap();
        let mut app = App::new(ViewConfig::default());
        let mut messages = Recorder::default();

        app.load(root.path().to_path_buf(), &mut messages);
        assert_eq!(app.table().len(), 1);

        assert_eq!(
            app.load(empty.path().to_path_buf(), &mut messages),
            OpenOutcome::Failed
        );
        assert_eq!(
            app.load(empty.path().join("missing"), &mut messages),
            OpenOutcome::Failed
        );

        assert_eq!(
            messages.errors,
            vec![ScanErrorKind::Empty, ScanErrorKind::NotADirectory]
        );
        assert_eq!(app.table().len(), 1);
        assert!(app.root().unwrap().ends_with(root.path().file_name().unwrap()));
    }

    #[test]
    fn test_initial_sort_policy() {
        let root = make_root(&["2023-02-01_Debug_v2"]);
        fs::create_dir(root.path().join("2023-01-01_Release_v1")).unwrap();
        let config = ViewConfig {
            initial_sort: Some(Column::Date),
            ..ViewConfig::default()
        };
        let mut app = App::new(config);
        let mut messages = Recorder::default();

        app.load(root.path().to_path_buf(), &mut messages);

        let dates: Vec<&str> = app.table().rows().iter().map(Entry::date).collect();
        assert_eq!(dates, vec!["2023-01-01", "2023-02-01"]);
        // Same state a header click leaves behind
        assert_eq!(
            app.table().direction(Column::Date),
            crate::types::SortDirection::Descending
        );
    }

    #[test]
    fn test_rescan_resets_sort_state() {
        let first = make_root(&["1_a_x", "2_b_y"]);
        let second = make_root(&["3_c_z", "4_d_w"]);
        let mut app = App::new(ViewConfig::default());
        let mut messages = Recorder::default();

        app.load(first.path().to_path_buf(), &mut messages);
        app.click_header(Column::Version);
        app.load(second.path().to_path_buf(), &mut messages);

        assert_eq!(app.table().last_sorted(), None);
        assert_eq!(
            app.table().direction(Column::Version),
            crate::types::SortDirection::Ascending
        );
    }

    #[test]
    fn test_malformed_names_are_counted() {
        let root = make_root(&["2023-01-01_Release_v1", "scratch"]);
        let mut app = App::new(ViewConfig::default());
        let mut messages = Recorder::default();

        let outcome = app.load(root.path().to_path_buf(), &mut messages);
        assert_eq!(outcome, OpenOutcome::Loaded { rows: 1, skipped: 1 });
        assert_eq!(app.skipped(), ["scratch".to_string()]);
        assert!(messages.errors.is_empty());

        // A failed rescan keeps the last report along with the rows
        app.load(root.path().join("missing"), &mut messages);
        assert_eq!(app.skipped().len(), 1);

        fs::remove_dir(root.path().join("scratch")).unwrap();
        app.load(root.path().to_path_buf(), &mut messages);
        assert!(app.skipped().is_empty());
    }
}
