//! Binary file codec for scan data produced by the SPM controller.
//!
//! Two file layouts, both little-endian:
//!
//! ```text
//! array file:        i32 d0 | i32 d1 | i32 d2 | i32 d3 | f32 * (d0*d1*d2*d3)
//! channel-list file: i32 count | i32 * count
//! ```
//!
//! Arrays are row-major with the first dimension varying slowest. An output
//! list for `scan_output_list` is an array file `<base>.dat` paired with a
//! channel-list file `<base>_ch.dat`.

pub mod array;
pub mod channels;
pub mod discovery;
pub mod error;
pub mod output_list;
pub mod shape;

pub use array::{decode_array, encode_array, read_array, write_array, ScanArray};
pub use channels::{decode_channel_list, encode_channel_list, read_channel_list, write_channel_list};
pub use discovery::{is_data_file_name, list_data_files};
pub use error::{DataError, Result};
pub use output_list::{load_output_list, save_output_list, OutputListPaths, CHANNEL_LIST_SUFFIX, DATA_FILE_EXTENSION};
pub use shape::{Shape, HEADER_SIZE};
