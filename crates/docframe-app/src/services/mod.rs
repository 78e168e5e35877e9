// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host services — data directory, persisted settings, and the capture session.

pub mod data_dir;
pub mod session;
pub mod settings;
