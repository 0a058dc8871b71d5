#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing, validation and level resolution must reject bad input without panicking.
    if let Ok(cfg) = toml::from_str::<daolog_config::Config>(data) {
        if cfg.validate().is_ok() {
            let _ = daolog_core::LoggerCfg::try_from(&cfg);
        }
    }

    if let Ok(level) = data.parse::<daolog_core::Level>() {
        // Display output must parse back to the same level.
        assert_eq!(level.to_string().parse::<daolog_core::Level>(), Ok(level));
    }
});
