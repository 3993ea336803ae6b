// Content Forge Agent Modules
// Copyright (c) 2026 Xing_The_Creator | Content Forge

pub mod content_generator;
pub mod production_tools;
pub mod templates;
pub mod video_creator;
