/// A bounded, sorted container that keeps the `bound` smallest elements pushed into it.
///
/// Ordering is given by a strict "less than" predicate. A new element is inserted in front
/// of the first element it compares less than, so elements that compare equal stay in
/// arrival order. Anything pushed past the bound falls off the back.
pub struct BoundedPriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    bound: usize,
    items: Vec<T>,
    less: F,
}

impl<T, F> BoundedPriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(bound: usize, less: F) -> Self {
        Self {
            bound,
            items: Vec::with_capacity(bound + 1),
            less,
        }
    }

    pub fn push(&mut self, value: T) {
        let pos = self
            .items
            .iter()
            .position(|item| (self.less)(&value, item))
            .unwrap_or(self.items.len());
        self.items.insert(pos, value);
        self.items.truncate(self.bound);
    }

    /// The largest retained element, if any.
    pub fn back(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.bound
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
