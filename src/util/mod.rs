// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by the index build, the oracle and the query path.

pub mod normalize;

pub use normalize::{normalize, tokenize, trim_token, Token};
