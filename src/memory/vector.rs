use std::mem;

use tracing::trace;

use super::Page;

/// Page-chunked list of fixed-size elements.
///
/// Every page holds exactly `element_capacity` elements, so the page and the
/// in-page offset of element `idx` are found by arithmetic alone:
///
/// ```text
/// page   = idx / element_capacity
/// offset = idx % element_capacity
/// ```
///
/// Elements are never moved once pushed. The first page is created with the
/// vector; later pages are appended as the tail page fills up and are kept
/// (and reused) when `pop` empties them.
#[derive(Debug)]
pub struct Vector<T> {
    element_capacity: usize,
    len: usize,
    pages: Vec<Page<T>>,
    /// Index of the page the next push writes into
    cursor: usize,
}

impl<T> Vector<T> {
    /// Creates an empty vector with `element_capacity` elements per page.
    ///
    /// # Panics
    /// Panics if `element_capacity` is zero.
    pub fn new(element_capacity: usize) -> Self {
        assert!(element_capacity > 0, "vector page capacity must be positive");
        Self {
            element_capacity,
            len: 0,
            pages: vec![Page::new(element_capacity)],
            cursor: 0,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of one element in bytes.
    pub fn element_size(&self) -> usize {
        mem::size_of::<T>()
    }

    /// Returns the number of elements per page.
    pub fn element_capacity(&self) -> usize {
        self.element_capacity
    }

    /// Returns the byte capacity shared by every page.
    pub fn page_bytes(&self) -> usize {
        self.element_size() * self.element_capacity
    }

    /// Returns the number of pages in the chain, including retained empty ones.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns the page number and in-page offset of element `idx`.
    pub fn locate(&self, idx: usize) -> (usize, usize) {
        (idx / self.element_capacity, idx % self.element_capacity)
    }

    /// Appends `value` and returns a reference to the stored element.
    pub fn push(&mut self, value: T) -> &mut T {
        let page = self.cursor;

        // The push below closes this page, so move the cursor past it first
        if self.pages[page].remaining() == 1 {
            if page + 1 == self.pages.len() {
                self.pages.push(Page::new(self.element_capacity));
                trace!(
                    pages = self.pages.len(),
                    capacity = self.element_capacity,
                    "vector page appended"
                );
            }
            self.cursor = page + 1;
        }

        self.len += 1;
        self.pages[page].push(value)
    }

    /// Appends a default element and returns it for writing.
    pub fn push_default(&mut self) -> &mut T
    where
        T: Default,
    {
        self.push(T::default())
    }

    /// Removes and returns the last element, or `None` if the vector is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        if self.pages[self.cursor].is_empty() {
            self.cursor -= 1;
        }
        self.len -= 1;
        self.pages[self.cursor].pop()
    }

    /// Returns the element at `idx`, or `None` if out of range.
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx >= self.len {
            return None;
        }
        let (page, offset) = self.locate(idx);
        self.pages[page].get(offset)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx >= self.len {
            return None;
        }
        let (page, offset) = self.locate(idx);
        self.pages[page].get_mut(offset)
    }

    /// Returns the element at `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= len`.
    pub fn seek(&self, idx: usize) -> &T {
        let len = self.len;
        match self.get(idx) {
            Some(element) => element,
            None => panic!("vector seek out of range: index {} but length is {}", idx, len),
        }
    }

    /// Returns the element at `idx` for writing.
    ///
    /// # Panics
    /// Panics if `idx >= len`.
    pub fn seek_mut(&mut self, idx: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(idx) {
            Some(element) => element,
            None => panic!("vector seek out of range: index {} but length is {}", idx, len),
        }
    }

    /// Returns the last element.
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Returns a cursor positioned on the first element.
    pub fn cursor(&self) -> VectorIter<'_, T> {
        VectorIter::new(self)
    }

    /// Returns an iterator over all elements in push order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.pages
            .iter()
            .flat_map(|page| page.as_slice().iter())
            .take(self.len)
    }
}

/// Cursor over a snapshot of a `Vector`.
///
/// The cursor starts on the first element. Each `advance` moves one element
/// forward, crossing into the next page when the current one is exhausted.
/// After `len - 1` advances the cursor rests on the last element and every
/// further `advance` returns `None` without moving.
#[derive(Debug)]
pub struct VectorIter<'a, T> {
    pages: &'a [Page<T>],
    element_capacity: usize,
    len: usize,
    step: usize,
    page: usize,
    offset: usize,
}

impl<'a, T> VectorIter<'a, T> {
    /// Creates a cursor bound to the vector's current length and first page.
    pub fn new(vector: &'a Vector<T>) -> Self {
        Self {
            pages: &vector.pages,
            element_capacity: vector.element_capacity,
            len: vector.len,
            step: 0,
            page: 0,
            offset: 0,
        }
    }

    /// Returns the element under the cursor, or `None` for an empty snapshot.
    pub fn current(&self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.pages[self.page].get(self.offset)
    }

    /// Moves to the next element and returns it, or `None` at the end.
    pub fn advance(&mut self) -> Option<&'a T> {
        if self.len == 0 || self.step >= self.len - 1 {
            return None;
        }

        self.offset += 1;
        if self.offset == self.element_capacity {
            self.page += 1;
            self.offset = 0;
        }
        self.step += 1;

        self.current()
    }

    /// Returns the index of the element under the cursor.
    pub fn position(&self) -> usize {
        self.step
    }

    /// Returns the length captured when the cursor was created.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Moves the cursor back to the first element.
    pub fn reset(&mut self) {
        self.step = 0;
        self.page = 0;
        self.offset = 0;
    }
}
