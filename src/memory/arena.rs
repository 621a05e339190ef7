use tracing::trace;

use super::Page;

/// Location of an allocation inside an `Arena`.
///
/// A span never crosses a page boundary: `offset + len` always lies within
/// the page it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArenaSpan {
    page: usize,
    offset: usize,
    len: usize,
}

impl ArenaSpan {
    /// The span of a zero-length allocation.
    pub const EMPTY: ArenaSpan = ArenaSpan {
        page: 0,
        offset: 0,
        len: 0,
    };

    /// Index of the page holding the allocation.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Offset of the allocation from the start of its page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Logical length of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset one past the last byte of the allocation.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Append-only allocator over a chain of byte pages.
///
/// ```text
/// +-----------+    +-----------+    +-----------------+
/// | page 0    | -> | page 1    | -> | page 2          |
/// | full      |    | active    |    | oversized, full |
/// +-----------+    +-----------+    +-----------------+
/// ```
///
/// Requests are served from the active page when they fit. A request that
/// does not fit gets a new page of `max(len, page_size)` bytes appended to
/// the chain; the cursor then stays on whichever of the two pages has more
/// room left. When the active page is exactly full the cursor moves to the
/// next page of the chain, or to none, in which case the next request
/// appends a page.
///
/// The first page is created by the first allocation, so an arena that is
/// never written to holds no memory. Nothing is ever freed before the whole
/// arena is dropped.
#[derive(Debug)]
pub struct Arena {
    page_size: usize,
    pages: Vec<Page<u8>>,
    cursor: Option<usize>,
}

impl Arena {
    /// Creates an empty arena whose pages default to `page_size` bytes.
    ///
    /// # Panics
    /// Panics if `page_size` is zero.
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "arena page size must be positive");
        Self {
            page_size,
            pages: Vec::new(),
            cursor: None,
        }
    }

    /// Returns the default page size in bytes.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of pages in the chain.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns the page at `index` in the chain.
    pub fn page(&self, index: usize) -> Option<&Page<u8>> {
        self.pages.get(index)
    }

    /// Returns the index of the page new requests are served from.
    pub fn active_page(&self) -> Option<usize> {
        self.cursor
    }

    /// Total capacity of all pages in bytes.
    pub fn allocated_bytes(&self) -> usize {
        self.pages.iter().map(Page::size).sum()
    }

    /// Total bytes handed out, terminators included.
    pub fn used_bytes(&self) -> usize {
        self.pages.iter().map(Page::used).sum()
    }

    /// Allocates `len` zeroed bytes that stay valid for the arena's lifetime.
    ///
    /// A zero-length request returns `ArenaSpan::EMPTY` and touches nothing.
    pub fn allocate(&mut self, len: usize) -> ArenaSpan {
        if len == 0 {
            return ArenaSpan::EMPTY;
        }

        let active = match self.cursor {
            Some(index) => index,
            None => {
                let index = self.append_page(len);
                self.cursor = Some(index);
                index
            }
        };

        let page = if self.pages[active].remaining() >= len {
            active
        } else {
            self.append_page(len)
        };
        let offset = self.pages[page].fill(len);

        if self.pages[page].remaining() > self.pages[active].remaining() {
            self.cursor = Some(page);
        }
        self.advance_cursor();

        ArenaSpan { page, offset, len }
    }

    /// Copies `data` into a fresh allocation.
    pub fn alloc_bytes(&mut self, data: &[u8]) -> ArenaSpan {
        let span = self.allocate(data.len());
        self.bytes_mut(span).copy_from_slice(data);
        span
    }

    /// Copies `text` into a fresh allocation followed by a zero terminator.
    ///
    /// The terminator is stored but is not part of the returned span.
    pub fn alloc_str(&mut self, text: &str) -> ArenaSpan {
        let stored = self.allocate(text.len() + 1);
        let span = ArenaSpan {
            len: text.len(),
            ..stored
        };
        self.bytes_mut(span).copy_from_slice(text.as_bytes());
        span
    }

    /// Returns the bytes of an allocation.
    ///
    /// # Panics
    /// Panics if `span` was not returned by this arena.
    pub fn bytes(&self, span: ArenaSpan) -> &[u8] {
        if span.is_empty() {
            return &[];
        }
        self.pages[span.page].bytes(span.offset, span.len)
    }

    /// Returns the bytes of an allocation for writing.
    pub fn bytes_mut(&mut self, span: ArenaSpan) -> &mut [u8] {
        if span.is_empty() {
            return &mut [];
        }
        self.pages[span.page].bytes_mut(span.offset, span.len)
    }

    /// Returns the text of an allocation made with `alloc_str`.
    ///
    /// # Panics
    /// Panics if the span does not hold UTF-8 text.
    pub fn str(&self, span: ArenaSpan) -> &str {
        std::str::from_utf8(self.bytes(span)).expect("arena span does not hold UTF-8 text")
    }

    fn append_page(&mut self, len: usize) -> usize {
        let size = len.max(self.page_size);
        self.pages.push(Page::new(size));
        trace!(size, pages = self.pages.len(), "arena page appended");
        self.pages.len() - 1
    }

    fn advance_cursor(&mut self) {
        while let Some(index) = self.cursor {
            if !self.pages[index].is_full() {
                break;
            }
            self.cursor = if index + 1 < self.pages.len() {
                Some(index + 1)
            } else {
                None
            };
        }
    }
}
