//! # palettree
//!
//! `palettree` is a Rust library for exact nearest-neighbour lookups over a fixed set of 3D
//! integer points, designed to be used in Rust as well as compiled to WebAssembly (WASM).
//! Its main use is colour quantisation: mapping every pixel of an image onto the closest
//! colour of a palette.
//!
//! ## Features
//!
//! - **Static k-d tree**: median-split construction in expected O(N log N), branch-and-bound
//!   nearest-neighbour queries in expected O(log N).
//! - **k-nearest queries**: backed by a bounded, sorted top-k container.
//! - **Parallel remapping**: palette lookups run on `rayon` since queries never mutate the tree.
//! - **WASM-first**: `wasm-bindgen` bindings for remapping `ImageData` buffers from JavaScript.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct; [`Palette`] wraps it for colour work.
//!
//! ```
//! use palettree::KdTree;
//!
//! let tree = KdTree::from_points(&[[0, 0, 0], [10, 0, 0], [0, 10, 0], [0, 0, 10]]);
//! let nearest = tree.nearest(&[9, 0, 0]).unwrap();
//! assert_eq!((nearest.index, nearest.dist_sq), (1, 1));
//! ```

mod bounded;
mod error;
mod kdtree;
mod palette;
mod point;
pub mod wasm;

pub use bounded::BoundedPriorityQueue;
pub use error::KdTreeError;
pub use error::Result;
pub use kdtree::KdTree;
pub use kdtree::Neighbor;
pub use palette::Palette;
pub use palette::count_unique_colors;
pub use palette::pixels;
pub use point::DIMENSIONS;
pub use point::Point;
pub use point::axis_distance_sq;
pub use point::distance_sq;
