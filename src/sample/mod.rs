pub(crate) mod tiled;
