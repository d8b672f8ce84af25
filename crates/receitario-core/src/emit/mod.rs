pub mod ast;
pub mod emitter;
pub mod render;
pub mod shape;

pub use ast::{Block, Expr, Item, Module};
pub use emitter::{DatasetEmitter, EmitterConfig, render};
pub use render::{Renderer, quote};
pub use shape::{FieldSpec, FieldType, RECIPE_SHAPE};
