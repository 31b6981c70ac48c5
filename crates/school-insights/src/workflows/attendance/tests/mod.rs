mod alerts;
mod common;
mod narrative;
