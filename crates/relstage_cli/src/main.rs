//! `relstage`: rebuild the production staging tree from the release build
//! output.
//!
//! Takes no arguments. Paths and the artifact filter are the defaults of
//! [`SpecPackageOptions`]; any filesystem failure aborts the run with a
//! non-zero exit status and the error chain on stderr.

mod logging;

use anyhow::Context;
use relstage_io_fs::{SpecPackageOptions, package_release};
use tracing::info;

fn main() -> anyhow::Result<()> {
    logging::init_tracing()?;

    let spec_pkg_options = SpecPackageOptions::default();
    let report = package_release(&spec_pkg_options).with_context(|| {
        format!(
            "Failed to package {} into {}",
            spec_pkg_options.path_dir_src.display(),
            spec_pkg_options.path_dir_dst.display()
        )
    })?;

    info!("{report}");
    Ok(())
}
