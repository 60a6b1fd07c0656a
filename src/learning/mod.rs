//! Small learning exercises over plain feature vectors.

pub mod perceptron;

pub use perceptron::{LabeledDataset, Perceptron};
