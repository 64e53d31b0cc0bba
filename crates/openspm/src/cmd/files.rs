use openspm_data::list_data_files;

use crate::cmd::FilesArgs;
use crate::exit::{data_error, io_error, CliResult, SUCCESS};
use crate::output::{print_data_files, DataFileEntry, OutputFormat};

pub fn run(args: FilesArgs, format: OutputFormat) -> CliResult<i32> {
    let paths = list_data_files(&args.dir).map_err(|err| data_error("listing failed", err))?;

    let entries = paths
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let size = std::fs::metadata(path)
                .map_err(|err| io_error(&format!("stat {} failed", path.display()), err))?
                .len();
            Ok(DataFileEntry {
                index,
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                size,
            })
        })
        .collect::<CliResult<Vec<_>>>()?;

    print_data_files(&entries, format);
    Ok(SUCCESS)
}
