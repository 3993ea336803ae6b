// Content Forge Engine Module
// Copyright (c) 2026 Xing_The_Creator | Content Forge
//
// Frame-level drawing primitives shared by the content and video agents.

pub mod canvas;
