//! Main module for scripture library functionality

pub mod building;
pub mod config;
pub mod error;
pub mod loader;
pub mod markers;
pub mod model;
pub mod navigation;
pub mod normalization;
pub mod reference;
pub mod render;
pub mod source;
pub mod transforms;
