//! Property tests for the sidebar loader.

use proptest::prelude::*;

use docs_sidebar::config::{SidebarLoader, SourceFormat};
use docs_sidebar::sidebar::{Sidebars, render};

use crate::strategies::tree;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: JSON emitted for a sidebar loads back to the same sidebar.
    #[test]
    fn property_emitted_json_loads_back(tree in tree()) {
        let sidebars = Sidebars::new([tree]).unwrap();
        let json = render::to_json(&sidebars).unwrap();

        let loaded = SidebarLoader::with_defaults()
            .load_from_str(&json, SourceFormat::Json)
            .unwrap();
        prop_assert_eq!(&*loaded.sidebars, &sidebars);
    }

    /// PROPERTY: Loading arbitrary YAML never panics.
    #[test]
    fn property_load_yaml_never_panics(content in "(?s).{0,256}") {
        let _ = SidebarLoader::with_defaults().load_from_str(&content, SourceFormat::Yaml);
    }

    /// PROPERTY: Loading arbitrary JSON never panics.
    #[test]
    fn property_load_json_never_panics(content in "(?s).{0,256}") {
        let _ = SidebarLoader::with_defaults().load_from_str(&content, SourceFormat::Json);
    }
}
