/// A fixed-capacity buffer with a fill cursor.
///
/// A page holds at most `size` elements of `T` (bytes, for arena pages).
/// The fill cursor is the number of elements written so far; it only moves
/// forward through `push`/`fill` and backward through `pop`. The backing
/// buffer is reserved once and never grows past `size`.
#[derive(Debug)]
pub struct Page<T> {
    data: Vec<T>,
    size: usize,
}

impl<T> Page<T> {
    /// Creates an empty page able to hold `size` elements.
    pub fn new(size: usize) -> Self {
        Self {
            data: Vec::with_capacity(size),
            size,
        }
    }

    /// Returns the capacity of the page in elements.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of elements written.
    pub fn used(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of elements that still fit.
    pub fn remaining(&self) -> usize {
        self.size - self.used()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true once the page is closed to further writes.
    ///
    /// # Panics
    /// Panics if more elements were written than the page holds, which means
    /// the page is corrupted.
    pub fn is_full(&self) -> bool {
        assert!(
            self.used() <= self.size,
            "page corrupted: {} elements used in a page of {}",
            self.used(),
            self.size
        );
        self.used() == self.size
    }

    /// Appends one element and returns a reference to it.
    ///
    /// # Panics
    /// Panics if the page is full.
    pub fn push(&mut self, value: T) -> &mut T {
        assert!(
            self.used() < self.size,
            "page overflow: push into a full page of {}",
            self.size
        );
        let offset = self.data.len();
        self.data.push(value);
        &mut self.data[offset]
    }

    /// Removes the last element written.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Returns the element at `offset`, if written.
    pub fn get(&self, offset: usize) -> Option<&T> {
        self.data.get(offset)
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.data.get_mut(offset)
    }

    /// Returns the written part of the page.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Page<u8> {
    /// Reserves `len` zeroed bytes at the fill cursor and returns their offset.
    ///
    /// # Panics
    /// Panics if the bytes do not fit in the page.
    pub fn fill(&mut self, len: usize) -> usize {
        assert!(
            len <= self.remaining(),
            "page overflow: {} bytes requested, {} available",
            len,
            self.remaining()
        );
        let offset = self.data.len();
        self.data.resize(offset + len, 0);
        offset
    }

    /// Returns `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    pub fn bytes_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.data[offset..offset + len]
    }
}
