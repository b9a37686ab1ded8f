#![no_main]

use docs_sidebar::config::{SidebarLoader, SourceFormat};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let loader = SidebarLoader::with_defaults();
        let _ = loader.load_from_str(text, SourceFormat::Yaml);
        let _ = loader.load_from_str(text, SourceFormat::Json);
    }
});
