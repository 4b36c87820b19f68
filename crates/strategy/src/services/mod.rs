pub mod signal_engine;
