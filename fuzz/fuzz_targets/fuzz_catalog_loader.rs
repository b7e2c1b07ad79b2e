#![no_main]
use std::sync::Arc;

use jammer_core::{Catalog, Session, Tier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    let Ok(file) = toml::from_str::<jammer_config::CatalogFile>(data) else {
        return;
    };
    if file.validate().is_err() {
        return;
    }
    let Ok(catalog) = Catalog::try_from(&file) else {
        return;
    };
    // A valid catalog must price a full build without panicking.
    let Ok(mut session) = Session::new(Arc::new(catalog)) else {
        return;
    };
    let ids: Vec<String> = session.bands().iter().take(12).map(|b| b.id.clone()).collect();
    for (i, id) in ids.iter().enumerate() {
        let tier = if i % 2 == 0 { Tier::W100 } else { Tier::W50 };
        let _ = session.set_band_tier(id, tier);
    }
    let _ = session.quote();
});
