mod helpers;
mod probe;
mod validate;
