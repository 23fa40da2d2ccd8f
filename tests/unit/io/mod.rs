mod image;
mod matrix;
