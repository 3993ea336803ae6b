// Content Forge Library Root
// Copyright (c) 2026 Xing_The_Creator | Content Forge

pub mod agent;
pub mod config;
pub mod engine;
pub mod media_backend;
