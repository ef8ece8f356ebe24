// Copyright (c) 2025 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod models;
pub mod remote;
pub mod utils;
