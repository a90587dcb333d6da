mod test_contract;
