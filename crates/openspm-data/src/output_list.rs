use std::path::{Path, PathBuf};

use tracing::info;

use crate::array::{read_array, write_array, ScanArray};
use crate::channels::{read_channel_list, write_channel_list};
use crate::error::Result;

/// Extension appended to the base name of every data file.
pub const DATA_FILE_EXTENSION: &str = ".dat";

/// Suffix, before the extension, that marks the channel-list companion.
pub const CHANNEL_LIST_SUFFIX: &str = "_ch";

/// The two files that make up an output list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputListPaths {
    /// `<base>.dat`: the array of output values.
    pub data: PathBuf,
    /// `<base>_ch.dat`: the output channel indices.
    pub channels: PathBuf,
}

impl OutputListPaths {
    /// Derive both paths from a base name without extension.
    ///
    /// The suffixes are appended to the full base, so `run.1` becomes
    /// `run.1.dat` and `run.1_ch.dat`.
    pub fn for_base(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref().as_os_str();

        let mut data = base.to_os_string();
        data.push(DATA_FILE_EXTENSION);

        let mut channels = base.to_os_string();
        channels.push(CHANNEL_LIST_SUFFIX);
        channels.push(DATA_FILE_EXTENSION);

        Self {
            data: data.into(),
            channels: channels.into(),
        }
    }
}

/// Write the output-list pair consumed by `scan_output_list`.
pub fn save_output_list(
    base: impl AsRef<Path>,
    channels: &[i32],
    output: &ScanArray,
) -> Result<OutputListPaths> {
    let paths = OutputListPaths::for_base(base);
    write_array(&paths.data, output)?;
    write_channel_list(&paths.channels, channels)?;
    info!(
        data = ?paths.data,
        shape = %output.shape(),
        channels = channels.len(),
        "saved output list"
    );
    Ok(paths)
}

/// Read back an output-list pair.
pub fn load_output_list(base: impl AsRef<Path>) -> Result<(Vec<i32>, ScanArray)> {
    let paths = OutputListPaths::for_base(base);
    let output = read_array(&paths.data)?;
    let channels = read_channel_list(&paths.channels)?;
    Ok((channels, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn companion_paths() {
        let paths = OutputListPaths::for_base("/data/line_a");
        assert_eq!(paths.data, PathBuf::from("/data/line_a.dat"));
        assert_eq!(paths.channels, PathBuf::from("/data/line_a_ch.dat"));
    }

    #[test]
    fn dotted_base_is_not_treated_as_extension() {
        let paths = OutputListPaths::for_base("run.1");
        assert_eq!(paths.data, PathBuf::from("run.1.dat"));
        assert_eq!(paths.channels, PathBuf::from("run.1_ch.dat"));
    }
}
