// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fetch results rendered into document locations.
//!
//! A [`FetchResult`] parses the response of a lazy fetch into content units
//! and renders them into an [`InsertionTarget`]:
//!
//! ```
//! use rivulet_core::Multicast;
//! use rivulet_dom::{FetchResult, MarkupParser, Node, Region};
//! use rivulet_fetch::Response;
//!
//! let source = Multicast::from_fn(|_token, emitter| {
//!     let _ = emitter.complete(Response::ok("<li>one</li><li>two</li>"));
//! });
//! let result = FetchResult::from_source(&source, MarkupParser);
//!
//! let list: Region<Node> = Region::new();
//! let binding = result.render_into(list.clone());
//!
//! let items: Vec<String> = list.contents().iter().map(Node::text_content).collect();
//! assert_eq!(items, ["one", "two"]);
//! binding.cancel();
//! assert_eq!(list.len(), 2);
//! ```

#[macro_use]
mod logging;

pub mod binding;
pub mod fetch_result;
pub mod fetcher_ext;
pub mod node;
pub mod parser;
pub mod target;

pub use self::binding::{Binding, Teardown};
pub use self::fetch_result::FetchResult;
pub use self::fetcher_ext::FetchResultExt;
pub use self::node::{Element, Node};
pub use self::parser::{parse_fragment, MarkupParser, Parser, TextParser};
pub use self::target::{InsertionTarget, Placement, Region};
