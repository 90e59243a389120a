//! PDF converters driven by the transform chain.

use crate::command;
use crate::error::CommandError;
use async_trait::async_trait;
use common::model::layout::Imposition;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Physical sheet the imposition stage lays pages on.
pub const SHEET_SIZE: &str = "{21.6cm,27.9cm}";

/// Where a single page is rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterTarget {
    pub page: u32,
    /// Output prefix handed to the rasterizer.
    pub root: PathBuf,
    /// File the rasterizer writes for `page` under `root`.
    pub output: PathBuf,
}

#[async_trait]
pub trait Transformer: Send + Sync {
    /// Writes a grayscale copy of `src` to `dst`.
    async fn grayscale(&self, src: &Path, dst: &Path) -> Result<(), CommandError>;

    /// Writes an N-up imposition of `src` to `dst`.
    async fn impose(&self, src: &Path, dst: &Path, imposition: Imposition)
        -> Result<(), CommandError>;

    /// Renders `target.page` of `src` to a JPEG at `target.output`.
    async fn rasterize(&self, src: &Path, target: &RasterTarget) -> Result<(), CommandError>;
}

/// Ghostscript, pdfjam and poppler's pdftoppm.
#[derive(Debug, Default)]
pub struct PdfTools;

fn os_args<const N: usize>(args: [&str; N]) -> Vec<OsString> {
    args.into_iter().map(OsString::from).collect()
}

#[async_trait]
impl Transformer for PdfTools {
    async fn grayscale(&self, src: &Path, dst: &Path) -> Result<(), CommandError> {
        let mut args = os_args([
            "-q",
            "-sDEVICE=pdfwrite",
            "-sProcessColorModel=DeviceGray",
            "-sColorConversionStrategy=Gray",
            "-dOverrideICC",
            "-o",
        ]);
        args.push(dst.into());
        args.push("-f".into());
        args.push(src.into());

        command::run("gs", args).await?;
        Ok(())
    }

    async fn impose(
        &self,
        src: &Path,
        dst: &Path,
        imposition: Imposition,
    ) -> Result<(), CommandError> {
        let mut args = vec![
            OsString::from("--nup"),
            imposition.nup_arg().into(),
            "--papersize".into(),
            SHEET_SIZE.into(),
        ];
        if imposition.landscape {
            args.push("--landscape".into());
        }
        args.push("--outfile".into());
        args.push(dst.into());
        args.push(src.into());

        command::run("pdfjam", args).await?;
        Ok(())
    }

    async fn rasterize(&self, src: &Path, target: &RasterTarget) -> Result<(), CommandError> {
        let page = target.page.to_string();
        let mut args = os_args(["-jpeg", "-f", &page, "-l", &page]);
        args.push(src.into());
        args.push(target.root.as_os_str().into());

        command::run("pdftoppm", args).await?;
        Ok(())
    }
}
