//! Append-only persistence of mapping results.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use snomed_types::{MappingRecord, TargetType, UnresolvedReport};

use crate::error::MapperResult;

/// Output file for CD to MPF mappings.
pub const MPF_MAP_FILE: &str = "cd_mpf_map.csv";
/// Output file for CD to MP mappings.
pub const MP_MAP_FILE: &str = "cd_mp_map.csv";
/// Output file for clinical drugs whose MPF needs manual review.
pub const MPF_ERROR_FILE: &str = "ErrorsComplexMpfSearch.csv";
/// Output file for clinical drugs whose MP needs manual review.
pub const MP_ERROR_FILE: &str = "ErrorsComplexMpSearch.csv";

/// Destination for mapping results.
pub trait MappingSink {
    /// Persists a resolved mapping.
    fn record_mapping(&mut self, record: &MappingRecord) -> MapperResult<()>;

    /// Persists a case needing manual review.
    fn record_unresolved(&mut self, report: &UnresolvedReport) -> MapperResult<()>;
}

/// Writes results to four append-only files in an output directory.
///
/// Mapping lines are pipe-delimited (`CD|<cd>|MPF|<mpf>`); unresolved lines
/// are free-text diagnostics. Every line is flushed as it is written, so an
/// interrupted run keeps everything mapped so far.
pub struct FileSink {
    mpf_maps: Writer<File>,
    mp_maps: Writer<File>,
    mpf_errors: File,
    mp_errors: File,
    dir: PathBuf,
}

impl FileSink {
    /// Opens (creating if needed) the output files under `dir`.
    pub fn create<P: AsRef<Path>>(dir: P) -> MapperResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        Ok(Self {
            mpf_maps: mapping_writer(open_append(&dir.join(MPF_MAP_FILE))?),
            mp_maps: mapping_writer(open_append(&dir.join(MP_MAP_FILE))?),
            mpf_errors: open_append(&dir.join(MPF_ERROR_FILE))?,
            mp_errors: open_append(&dir.join(MP_ERROR_FILE))?,
            dir: dir.to_path_buf(),
        })
    }

    /// Returns the output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn mapping_writer(file: File) -> Writer<File> {
    WriterBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file)
}

impl MappingSink for FileSink {
    fn record_mapping(&mut self, record: &MappingRecord) -> MapperResult<()> {
        let writer = match record.target {
            TargetType::Mpf => &mut self.mpf_maps,
            TargetType::Mp => &mut self.mp_maps,
        };
        writer.write_record(record.fields())?;
        writer.flush()?;
        Ok(())
    }

    fn record_unresolved(&mut self, report: &UnresolvedReport) -> MapperResult<()> {
        let file = match report.target {
            TargetType::Mpf => &mut self.mpf_errors,
            TargetType::Mp => &mut self.mp_errors,
        };
        writeln!(file, "{}", report)?;
        Ok(())
    }
}
