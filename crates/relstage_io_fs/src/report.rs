//! Package report models and mutable report builder.

use std::fmt;

/// Aggregate counters for one `package_release` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportPackage {
    /// Source directories visited by the walk.
    pub cnt_dirs_scanned: u64,
    /// Destination directories created (root excluded).
    pub cnt_dirs_created: u64,
    /// Source files seen.
    pub cnt_files_scanned: u64,
    /// Files copied into the destination.
    pub cnt_files_copied: u64,
    /// Files rejected by the inclusion filter.
    pub cnt_files_skipped: u64,
    /// Total bytes written by file copies.
    pub n_bytes_copied: u64,
}

impl ReportPackage {
    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} dirs={}/{} files={}/{} skipped={} bytes={}",
            self.cnt_dirs_created,
            self.cnt_dirs_scanned,
            self.cnt_files_copied,
            self.cnt_files_scanned,
            self.cnt_files_skipped,
            self.n_bytes_copied
        )
    }
}

impl fmt::Display for ReportPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[PACKAGE]"))
    }
}

/// Mutable accumulator for package statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportPackageBuilder {
    report: ReportPackage,
}

impl ReportPackageBuilder {
    /// Increment visited directory count by one.
    pub fn add_dir_scanned(&mut self) {
        self.report.cnt_dirs_scanned += 1;
    }

    /// Increment created directory count by one.
    pub fn add_dir_created(&mut self) {
        self.report.cnt_dirs_created += 1;
    }

    /// Increment scanned file count by one.
    pub fn add_file_scanned(&mut self) {
        self.report.cnt_files_scanned += 1;
    }

    /// Record one copied file of `n_bytes`.
    pub fn add_file_copied(&mut self, n_bytes: u64) {
        self.report.cnt_files_copied += 1;
        self.report.n_bytes_copied += n_bytes;
    }

    /// Increment filtered-out file count by one.
    pub fn add_file_skipped(&mut self) {
        self.report.cnt_files_skipped += 1;
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportPackage {
        self.report
    }
}
