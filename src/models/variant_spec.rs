/// 试卷册编号默认位数
pub const DEFAULT_BOOKLET_ID_LEN: usize = 7;

/// 变体组卷参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    /// 每个配额分组抽取的题目数
    pub per_group_quota: usize,
    /// 题库中前多少个分组是配额分组
    pub group_count: usize,
    /// 从整个题库额外抽取的题目数
    pub overflow_count: usize,
    /// 每个变体的题目总数
    pub total_questions: usize,
    /// 需要生成的变体数量
    pub variant_count: usize,
    /// 分组题目不足时是否允许放回抽样
    pub sample_with_replacement_on_shortfall: bool,
    /// 试卷册编号位数
    pub booklet_id_len: usize,
}

impl VariantSpec {
    /// 创建组卷参数（严格模式，编号 7 位）
    pub fn new(
        per_group_quota: usize,
        group_count: usize,
        overflow_count: usize,
        total_questions: usize,
        variant_count: usize,
    ) -> Self {
        Self {
            per_group_quota,
            group_count,
            overflow_count,
            total_questions,
            variant_count,
            sample_with_replacement_on_shortfall: false,
            booklet_id_len: DEFAULT_BOOKLET_ID_LEN,
        }
    }

    pub fn with_replacement_on_shortfall(mut self, enabled: bool) -> Self {
        self.sample_with_replacement_on_shortfall = enabled;
        self
    }

    pub fn with_booklet_id_len(mut self, len: usize) -> Self {
        self.booklet_id_len = len;
        self
    }

    /// 配额题 + 附加题的数量，溢出时为 `None`
    pub fn drawn_total(&self) -> Option<usize> {
        self.per_group_quota
            .checked_mul(self.group_count)?
            .checked_add(self.overflow_count)
    }

    /// 根据题目总数推算附加题数量（不足时为 0）
    pub fn auto_overflow(total_questions: usize, per_group_quota: usize, group_count: usize) -> usize {
        total_questions.saturating_sub(per_group_quota.saturating_mul(group_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawn_total() {
        assert_eq!(VariantSpec::new(6, 8, 2, 50, 1).drawn_total(), Some(50));
        assert_eq!(VariantSpec::new(7, 8, 2, 50, 1).drawn_total(), Some(58));
    }

    #[test]
    fn test_drawn_total_overflow_is_none() {
        assert_eq!(VariantSpec::new(usize::MAX, 2, 0, usize::MAX, 1).drawn_total(), None);
        assert_eq!(VariantSpec::new(1, 1, usize::MAX, usize::MAX, 1).drawn_total(), None);
    }

    #[test]
    fn test_auto_overflow_never_negative() {
        assert_eq!(VariantSpec::auto_overflow(50, 6, 8), 2);
        assert_eq!(VariantSpec::auto_overflow(40, 6, 8), 0);
    }
}
