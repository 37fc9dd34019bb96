// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Second hop of the importer indirection.
//!
//! Importer modules import from `PROXY_PREFIX + path`, which the interceptor
//! keeps external. Once the module is compiled, the quoted proxy id is swapped
//! for the quoted output path.

use crate::namespace::{proxy_id, ModuleRequest};

use super::synth::js_string;

/// Rewrite proxy specifiers in an importer module; `None` for any other module
pub(crate) fn rewrite_importer(code: &str, id: &str) -> Option<String> {
    let ModuleRequest::ImporterOf(out_path) = ModuleRequest::parse(id) else {
        return None;
    };
    let proxy = js_string(&proxy_id(out_path));
    Some(code.replace(&proxy, &js_string(out_path)))
}
