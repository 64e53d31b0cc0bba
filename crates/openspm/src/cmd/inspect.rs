use std::path::{Path, PathBuf};

use openspm_data::{read_array, read_channel_list, OutputListPaths, ScanArray, DATA_FILE_EXTENSION};

use crate::cmd::InspectArgs;
use crate::exit::{data_error, CliResult, SUCCESS};
use crate::output::{print_array_summary, ArraySummary, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let array = read_array(&args.path).map_err(|err| data_error("read failed", err))?;

    let channels_path = args.channels.or_else(|| sibling_channel_list(&args.path));
    let channels = channels_path
        .map(|path| read_channel_list(&path))
        .transpose()
        .map_err(|err| data_error("channel list read failed", err))?;

    let summary = summarize(&args.path, &array, channels);
    print_array_summary(&summary, format);
    Ok(SUCCESS)
}

/// `<base>_ch.dat` next to `<base>.dat`, if it exists.
fn sibling_channel_list(path: &Path) -> Option<PathBuf> {
    let ext = path.extension()?.to_str()?;
    if !DATA_FILE_EXTENSION.trim_start_matches('.').eq_ignore_ascii_case(ext) {
        return None;
    }
    let candidate = OutputListPaths::for_base(path.with_extension("")).channels;
    (candidate != path && candidate.is_file()).then_some(candidate)
}

fn summarize(path: &Path, array: &ScanArray, channels: Option<Vec<i32>>) -> ArraySummary {
    let data = array.data();
    let min = data.iter().copied().filter(|v| !v.is_nan()).reduce(f32::min);
    let max = data.iter().copied().filter(|v| !v.is_nan()).reduce(f32::max);
    let finite: Vec<f64> = data
        .iter()
        .filter(|v| v.is_finite())
        .map(|&v| f64::from(v))
        .collect();
    let mean = (!finite.is_empty()).then(|| finite.iter().sum::<f64>() / finite.len() as f64);

    ArraySummary {
        path: path.display().to_string(),
        shape: array.shape().dims(),
        elements: data.len(),
        min,
        max,
        mean,
        channels,
    }
}
