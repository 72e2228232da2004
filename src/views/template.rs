// Derived from III-IV (core/src/template.rs)
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.
//
// Modified: unknown keys are kept verbatim and logged instead of panicking.

//! Trivial templating engine.

/// Performs named string replacements in `input` based on `replacements`.
///
/// The `input` string can have `%key%` strings in it which are replaced by the value of `key` in
/// `replacements`.  Raw `%` characters are escaped as `%%` and nested expansions are not
/// supported.  A key without a replacement is kept verbatim, delimiters included.
pub fn apply(input: &'static str, replacements: &[(&'static str, &str)]) -> String {
    let mut output = String::with_capacity(input.len());
    let mut partial_key: Option<String> = None;
    for ch in input.chars() {
        if ch == '%' {
            match partial_key.take() {
                Some(key) if key.is_empty() => output.push('%'),
                Some(key) => match replacements.iter().find(|(candidate, _)| *candidate == key) {
                    Some((_, value)) => output.push_str(value),
                    None => {
                        tracing::warn!("No replacement for template key {}", key);
                        output.push('%');
                        output.push_str(&key);
                        output.push('%');
                    }
                },
                None => partial_key = Some(String::new()),
            }
        } else {
            match partial_key.as_mut() {
                Some(k) => k.push(ch),
                None => output.push(ch),
            }
        }
    }
    if let Some(key) = partial_key {
        output.push('%');
        output.push_str(&key);
    }
    output
}
