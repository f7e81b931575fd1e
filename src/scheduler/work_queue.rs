//! Work-queue over an arena of course nodes.
//!
//! A doubly linked list threaded through vectors indexed by node id.
//! Removal and front-reinsertion are O(1) and never move other nodes, so
//! a cursor obtained with [`WorkQueue::next`] before removing the current
//! node stays valid.

/// Ordered queue of course node indices.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    prev: Vec<Option<usize>>,
    next: Vec<Option<usize>>,
    queued: Vec<bool>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl WorkQueue {
    /// Creates an empty queue able to hold nodes `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            prev: vec![None; capacity],
            next: vec![None; capacity],
            queued: vec![false; capacity],
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates a queue holding `order`, front to back.
    pub fn from_order<I>(capacity: usize, order: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut queue = Self::new(capacity);
        for node in order {
            queue.push_back(node);
        }
        queue
    }

    /// Number of queued nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `node` is queued.
    #[inline]
    pub fn contains(&self, node: usize) -> bool {
        self.queued.get(node).copied().unwrap_or(false)
    }

    /// First queued node.
    #[inline]
    pub fn front(&self) -> Option<usize> {
        self.head
    }

    /// Node after `node`, if `node` is queued.
    #[inline]
    pub fn next(&self, node: usize) -> Option<usize> {
        if self.contains(node) {
            self.next[node]
        } else {
            None
        }
    }

    /// Appends `node`. Returns `false` if it was already queued.
    pub fn push_back(&mut self, node: usize) -> bool {
        if self.contains(node) {
            return false;
        }
        self.prev[node] = self.tail;
        self.next[node] = None;
        match self.tail {
            Some(t) => self.next[t] = Some(node),
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.queued[node] = true;
        self.len += 1;
        true
    }

    /// Prepends `node`. Returns `false` if it was already queued.
    pub fn push_front(&mut self, node: usize) -> bool {
        if self.contains(node) {
            return false;
        }
        self.prev[node] = None;
        self.next[node] = self.head;
        match self.head {
            Some(h) => self.prev[h] = Some(node),
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.queued[node] = true;
        self.len += 1;
        true
    }

    /// Prepends `nodes`, keeping their relative order.
    pub fn push_front_all(&mut self, nodes: &[usize]) {
        for &node in nodes.iter().rev() {
            self.push_front(node);
        }
    }

    /// Unlinks `node`. Returns `false` if it was not queued.
    pub fn remove(&mut self, node: usize) -> bool {
        if !self.contains(node) {
            return false;
        }
        let (prev, next) = (self.prev[node], self.next[node]);
        match prev {
            Some(p) => self.next[p] = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.prev[n] = prev,
            None => self.tail = prev,
        }
        self.prev[node] = None;
        self.next[node] = None;
        self.queued[node] = false;
        self.len -= 1;
        true
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.head, move |&node| self.next[node])
    }
}
