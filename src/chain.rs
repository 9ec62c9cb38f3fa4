/// Apply `operations` to `arg` one after another, left to right.
///
/// A plain left fold: the first operation sees `arg`, each later one sees
/// the previous result. With no operations `arg` is returned as is.
///
/// ```
/// use strtidy::chain_operations;
/// let ops: [fn(String) -> String; 2] = [|s| s.to_uppercase(), |s| s.trim().to_owned()];
/// assert_eq!(chain_operations(" abc ".to_owned(), ops), "ABC");
/// ```
pub fn chain_operations<T, I, F>(arg: T, operations: I) -> T
where
    I: IntoIterator<Item = F>,
    F: FnOnce(T) -> T,
{
    operations.into_iter().fold(arg, |acc, op| op(acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_in_order() {
        let ops: [fn(String) -> String; 2] = [|s| s.to_uppercase(), |s| s.trim().to_owned()];
        assert_eq!(chain_operations(" abc ".to_owned(), ops), "ABC");
    }

    #[test]
    fn order_is_observable() {
        let ops: Vec<Box<dyn Fn(i32) -> i32>> = vec![Box::new(|x| x + 1), Box::new(|x| x * 10)];
        assert_eq!(chain_operations(1, ops), 20);
    }

    #[test]
    fn no_operations_is_identity() {
        let ops: [fn(i32) -> i32; 0] = [];
        assert_eq!(chain_operations(5, ops), 5);
    }
}
