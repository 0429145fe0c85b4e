pub mod alpha_compositor;
pub mod apply_alpha_mask;
pub mod background_stats;
pub mod classifier;
pub mod cleanup;
pub mod config;
pub mod cue_maps;
pub mod flood_fill;
pub mod mask;
pub mod segment;
