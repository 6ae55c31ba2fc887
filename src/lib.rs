pub mod photostamp_core;
