pub mod activity_mapper;
pub mod dto;
pub mod grid_builder;
pub mod heatmap_service;
pub mod intensity;
