//! Element-wise traversal strategies.
//!
//! A [`Source`] yields the scalar at position `i`; a [`Sink`] accepts the
//! result for position `i`. Copying traversals pair a source with a freshly
//! allocated sink; in-place traversals use one value that is both.

use crate::buffer::TypedBuffer;
use crate::metrics::record_evaluations;
use crate::options::Accessor;
use crate::path::DeepPath;
use crate::value::Value;
use std::borrow::{Borrow, BorrowMut};

pub trait Source {
    fn len(&self) -> usize;

    fn extract(&self, index: usize) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait Sink {
    fn write_back(&mut self, index: usize, value: f64);
}

/// Writes `f(source[i])` into `sink[i]` for every position of `source`.
pub fn traverse<S, K, F>(source: &S, sink: &mut K, f: F)
where
    S: Source + ?Sized,
    K: Sink + ?Sized,
    F: Fn(f64) -> f64,
{
    let len = source.len();
    for index in 0..len {
        sink.write_back(index, f(source.extract(index)));
    }
    record_evaluations(len);
}

/// Replaces every position of `target` with `f` applied to its own value.
pub fn traverse_in_place<T, F>(target: &mut T, f: F)
where
    T: Source + Sink + ?Sized,
    F: Fn(f64) -> f64,
{
    let len = target.len();
    for index in 0..len {
        let value = target.extract(index);
        target.write_back(index, f(value));
    }
    record_evaluations(len);
}

fn number_or_nan(value: &Value) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

impl Source for [Value] {
    fn len(&self) -> usize {
        <[Value]>::len(self)
    }

    fn extract(&self, index: usize) -> f64 {
        number_or_nan(&self[index])
    }
}

impl Sink for [Value] {
    fn write_back(&mut self, index: usize, value: f64) {
        self[index] = Value::Number(value);
    }
}

impl Source for TypedBuffer {
    fn len(&self) -> usize {
        TypedBuffer::len(self)
    }

    fn extract(&self, index: usize) -> f64 {
        self.get(index).unwrap_or(f64::NAN)
    }
}

impl Sink for TypedBuffer {
    fn write_back(&mut self, index: usize, value: f64) {
        self.set(index, value);
    }
}

/// Sequence elements, optionally read through an accessor.
pub struct Elements<'a, I> {
    items: I,
    accessor: Option<&'a Accessor>,
}

impl<'a, I> Elements<'a, I> {
    pub fn new(items: I, accessor: Option<&'a Accessor>) -> Self {
        Elements { items, accessor }
    }
}

impl<I: AsRef<[Value]>> Source for Elements<'_, I> {
    fn len(&self) -> usize {
        self.items.as_ref().len()
    }

    fn extract(&self, index: usize) -> f64 {
        let item = &self.items.as_ref()[index];
        match self.accessor {
            Some(accessor) => accessor(item, index),
            None => number_or_nan(item),
        }
    }
}

impl<I: AsMut<[Value]>> Sink for Elements<'_, I> {
    fn write_back(&mut self, index: usize, value: f64) {
        self.items.as_mut()[index] = Value::Number(value);
    }
}

/// Typed buffer elements, optionally read through an accessor that sees
/// each element as a number record.
pub struct TypedElements<'a, B> {
    buffer: B,
    accessor: Option<&'a Accessor>,
}

impl<'a, B> TypedElements<'a, B> {
    pub fn new(buffer: B, accessor: Option<&'a Accessor>) -> Self {
        TypedElements { buffer, accessor }
    }
}

impl<B: Borrow<TypedBuffer>> Source for TypedElements<'_, B> {
    fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    fn extract(&self, index: usize) -> f64 {
        let raw = Source::extract(self.buffer.borrow(), index);
        match self.accessor {
            Some(accessor) => accessor(&Value::Number(raw), index),
            None => raw,
        }
    }
}

impl<B: BorrowMut<TypedBuffer>> Sink for TypedElements<'_, B> {
    fn write_back(&mut self, index: usize, value: f64) {
        self.buffer.borrow_mut().set(index, value);
    }
}

/// Records whose scalar lives at a deep path; results go back to the same leaf.
pub struct Records<'a> {
    items: &'a mut [Value],
    path: &'a DeepPath,
}

impl<'a> Records<'a> {
    pub fn new(items: &'a mut [Value], path: &'a DeepPath) -> Self {
        Records { items, path }
    }
}

impl Source for Records<'_> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn extract(&self, index: usize) -> f64 {
        self.path.read(&self.items[index])
    }
}

impl Sink for Records<'_> {
    fn write_back(&mut self, index: usize, value: f64) {
        self.path.write(&mut self.items[index], value);
    }
}
