mod loader;

pub use loader::{ClientCsvRecord, ClientImportError, ClientImporter};
